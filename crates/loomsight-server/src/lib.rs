//! Loomsight Web Server
//!
//! Axum-based REST API for the textile manufacturing dashboard.
//!
//! Serves demo metric data per module, the headline KPIs, and the
//! predictive-insight endpoint. The insight endpoint always answers 200:
//! provider failures are folded into the response body by the aggregator,
//! so the dashboard never sees a broken request because the AI step failed.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use loomsight_core::{CompletionBackend, CompletionClient, InsightAggregator, ProviderRegistry};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub providers: ProviderRegistry,
    pub aggregator: InsightAggregator,
}

/// Create the application router
pub fn create_router(static_dir: Option<&str>, config: ServerConfig) -> Router {
    create_router_with_options(static_dir, config, CompletionClient::from_env())
}

/// Create the application router with an injected completion client (for testing)
pub fn create_router_with_options(
    static_dir: Option<&str>,
    config: ServerConfig,
    client: Option<CompletionClient>,
) -> Router {
    if let Some(ref c) = client {
        info!(
            "Completion backend configured: {} (model: {})",
            c.host(),
            c.model()
        );
    } else {
        info!("ℹ️  Completion backend not configured (set KIMI_API_KEY to enable predictions)");
    }

    let state = Arc::new(AppState {
        providers: ProviderRegistry::demo(),
        aggregator: InsightAggregator::new(client),
    });

    let api_routes = Router::new()
        // Headline KPIs
        .route("/kpis", get(handlers::get_kpis))
        // Per-module metrics (one parameterized handler for all six modules)
        .route("/modules/:module", get(handlers::get_module_metrics))
        // Predictive insights
        .route("/predictive-insights", get(handlers::get_predictive_insights))
        // Inventory breakdown
        .route("/inventory", get(handlers::get_inventory))
        // Alert feed
        .route("/alerts", get(handlers::get_alerts))
        // Performance detail
        .route("/performance", get(handlers::get_performance))
        // Report export
        .route("/export/report", get(handlers::export_report));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve the dashboard front-end if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Read the environment once; the same client serves the health check
    // and the router.
    let client = CompletionClient::from_env();
    if let Some(ref c) = client {
        check_completion_connection(c).await;
    }

    let app = create_router_with_options(static_dir, config, client);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log completion backend connection status
async fn check_completion_connection(client: &CompletionClient) -> bool {
    let healthy = client.health_check().await;
    if healthy {
        info!(
            "✅ Completion backend connected: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  Completion backend configured but not responding: {} (model: {})",
            client.host(),
            client.model()
        );
    }
    healthy
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err.into()),
        }
    }
}
