//! Pluggable completion backend abstraction
//!
//! The predictive-insight path issues one chat-completion request per
//! invocation. This module keeps that call behind a backend-agnostic
//! interface so tests can substitute a scripted provider without any
//! real network access.
//!
//! # Architecture
//!
//! - `CompletionBackend` trait: defines the interface for completion calls
//! - `CompletionClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `KimiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (kimi, mock). Default: kimi
//! - `KIMI_API_KEY`: Kimi API credential (required for kimi backend)
//! - `KIMI_API_BASE`: API base URL (default: https://api.moonshot.cn)
//! - `KIMI_MODEL`: Model name (default: kimi-k2)
//! - `KIMI_TIMEOUT_SECS`: Request timeout in seconds (default: 10)

mod kimi;
mod mock;

pub use kimi::KimiBackend;
pub use mock::{MockBackend, MockReply};

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for completion backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue a single chat-completion request and return the completion text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete completion client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum CompletionClient {
    /// Kimi chat-completions API over HTTPS
    Kimi(KimiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl CompletionClient {
    /// Create a completion client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `kimi` (default): requires KIMI_API_KEY
    /// - `mock`: scripted backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    /// A missing credential is an expected state, not an error.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "kimi".to_string());

        match backend.to_lowercase().as_str() {
            "kimi" => KimiBackend::from_env().map(CompletionClient::Kimi),
            "mock" => Some(CompletionClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to kimi");
                KimiBackend::from_env().map(CompletionClient::Kimi)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        CompletionClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            CompletionClient::Kimi(b) => b.complete(prompt).await,
            CompletionClient::Mock(b) => b.complete(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            CompletionClient::Kimi(b) => b.health_check().await,
            CompletionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            CompletionClient::Kimi(b) => b.model(),
            CompletionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            CompletionClient::Kimi(b) => b.host(),
            CompletionClient::Mock(b) => b.host(),
        }
    }
}
