//! Test utilities for loomsight-core
//!
//! Provides a mock chat-completion server speaking the same wire shape as
//! the Kimi API, with scripted behavior for exercising the success, error,
//! malformed and timeout paths without real network access.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Scripted behavior for the mock provider
#[derive(Clone)]
pub enum MockProviderBehavior {
    /// Reply with a well-formed completion containing this text
    Reply(String),
    /// Reply 200 with a body missing the `choices` field
    Malformed,
    /// Reply with this HTTP status and an error body
    Status(u16),
    /// Sleep before replying with this text
    Delay(Duration, String),
}

/// Mock completion server for testing
pub struct MockCompletionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start the mock server on an available port
    pub async fn start(behavior: MockProviderBehavior) -> Self {
        let app = Router::new()
            .route("/v1/chat/completions", post(handle_completion))
            .with_state(behavior);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_completion(
    State(behavior): State<MockProviderBehavior>,
    Json(request): Json<Value>,
) -> axum::response::Response {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    let model = request["model"].as_str().unwrap_or("kimi-k2").to_string();

    match behavior {
        MockProviderBehavior::Reply(text) => Json(completion_body(&model, &text)).into_response(),
        MockProviderBehavior::Malformed => {
            Json(json!({"id": "cmpl-mock", "model": model})).into_response()
        }
        MockProviderBehavior::Status(status) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({"error": {"message": "mock provider failure"}})),
        )
            .into_response(),
        MockProviderBehavior::Delay(duration, text) => {
            tokio::time::sleep(duration).await;
            Json(completion_body(&model, &text)).into_response()
        }
    }
}

fn completion_body(model: &str, text: &str) -> Value {
    json!({
        "id": "cmpl-mock",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": text
            },
            "finish_reason": "stop"
        }]
    })
}
