//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod alerts;
pub mod insights;
pub mod metrics;
pub mod reports;

// Re-export all handlers for use in router
pub use alerts::*;
pub use insights::*;
pub use metrics::*;
pub use reports::*;
