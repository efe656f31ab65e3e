//! Alert feed handler

use axum::Json;

use loomsight_core::AlertFeed;

/// GET /api/alerts - System alerts and notifications
pub async fn get_alerts() -> Json<AlertFeed> {
    Json(AlertFeed::demo())
}
