//! Loomsight Core Library
//!
//! Shared functionality for the Loomsight textile dashboard backend:
//! - Metric snapshot model and per-module demo data providers
//! - Digest formatter for compact metric summaries
//! - Predictive insight aggregator with risk classification
//! - Pluggable completion backends (Kimi chat-completions API, mock)

pub mod ai;
pub mod digest;
pub mod error;
pub mod insight;
pub mod metrics;
pub mod models;

/// Test utilities including mock completion server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{CompletionBackend, CompletionClient, KimiBackend, MockBackend, MockReply};
pub use digest::format_digest;
pub use error::{Error, Result};
pub use insight::{derive_risk, InsightAggregator, InsightResult, RiskLevel};
pub use metrics::{MetricSnapshot, MetricValue, MetricsProvider, Module, ProviderRegistry};
pub use models::{
    Alert, AlertFeed, DailyReport, DailyTargets, InventoryStatus, KpiSummary, KpiTrends,
    MaterialCategory, PerformanceReport,
};
