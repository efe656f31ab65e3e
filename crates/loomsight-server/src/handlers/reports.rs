//! Report export handler

use axum::Json;

use loomsight_core::DailyReport;

/// GET /api/export/report - Daily report payload for PDF/CSV export
pub async fn export_report() -> Json<DailyReport> {
    Json(DailyReport::demo())
}
