//! Command implementations

mod dashboard;
mod insight;
mod serve;

pub use dashboard::cmd_dashboard;
pub use insight::cmd_insight;
pub use serve::cmd_serve;
