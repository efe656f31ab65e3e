//! Metric handlers
//!
//! One parameterized handler covers all six operational modules; the
//! headline KPI and inventory endpoints keep their fixed shapes for the
//! dashboard front-end.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use loomsight_core::{InventoryStatus, KpiSummary, MetricSnapshot, Module, PerformanceReport};

/// GET /api/kpis - Headline dashboard KPIs
pub async fn get_kpis() -> Json<KpiSummary> {
    Json(KpiSummary::demo())
}

/// GET /api/modules/:module - Current metrics for one module
pub async fn get_module_metrics(
    State(state): State<Arc<AppState>>,
    Path(module): Path<String>,
) -> Result<Json<MetricSnapshot>, AppError> {
    let module: Module = module
        .parse()
        .map_err(|_| AppError::not_found("Unknown module"))?;

    let snapshot = state
        .providers
        .snapshot(module)
        .ok_or_else(|| AppError::not_found("No provider for module"))?;

    Ok(Json(snapshot))
}

/// GET /api/inventory - Inventory status across all materials
pub async fn get_inventory() -> Json<InventoryStatus> {
    Json(InventoryStatus::demo())
}

/// GET /api/performance - Detailed performance metrics
pub async fn get_performance() -> Json<PerformanceReport> {
    Json(PerformanceReport::demo())
}
