//! Mock backend for testing
//!
//! Returns scripted completions or failures without any network access,
//! and counts invocations so tests can assert how many outbound calls a
//! code path performed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::CompletionBackend;

/// Scripted behavior for the mock backend
#[derive(Clone)]
pub enum MockReply {
    /// Return this completion text
    Text(String),
    /// Fail with a provider error carrying this status
    ProviderError(u16),
    /// Fail with a malformed-response error
    Malformed,
}

/// Mock completion backend for testing
#[derive(Clone)]
pub struct MockBackend {
    reply: MockReply,
    calls: Arc<AtomicUsize>,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend replying with a fixed advisory
    pub fn new() -> Self {
        Self::with_reply(MockReply::Text(
            "Metrics within normal operating range.".to_string(),
        ))
    }

    /// Create a mock backend with scripted behavior
    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: true,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Number of complete() invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::ProviderError(status) => Err(Error::Provider {
                status: *status,
                body: "mock provider failure".to_string(),
            }),
            MockReply::Malformed => {
                Err(Error::MalformedResponse("response contained no choices".into()))
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockBackend::new();
        assert_eq!(mock.calls(), 0);
        mock.complete("a").await.unwrap();
        mock.complete("b").await.unwrap();
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_counter_shared_across_clones() {
        let mock = MockBackend::new();
        let clone = mock.clone();
        clone.complete("a").await.unwrap();
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let mock = MockBackend::with_reply(MockReply::ProviderError(429));
        let err = mock.complete("a").await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: 429, .. }));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_mock() {
        let mock = MockBackend::unhealthy();
        assert!(!mock.health_check().await);
    }
}
