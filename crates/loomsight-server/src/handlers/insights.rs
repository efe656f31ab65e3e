//! Predictive insight handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;
use loomsight_core::{InsightResult, KpiSummary};

/// GET /api/predictive-insights - Risk-annotated prediction for current metrics
///
/// Always answers 200: the aggregator converts every provider failure
/// (no credential, timeout, bad status, malformed body) into a labeled
/// `InsightResult` instead of an HTTP error.
pub async fn get_predictive_insights(State(state): State<Arc<AppState>>) -> Json<InsightResult> {
    let kpis = KpiSummary::demo();
    let snapshots = state.providers.snapshots();

    Json(state.aggregator.get_insight(&kpis, &snapshots).await)
}
