//! Kimi chat-completions backend
//!
//! Talks to the Kimi (Moonshot) `/v1/chat/completions` endpoint, or any
//! server implementing the same API shape. The reqwest client carries a
//! finite timeout; a slow provider surfaces as an error, never a hang.
//!
//! # Configuration
//!
//! Environment variables:
//! - `KIMI_API_KEY`: API credential (required)
//! - `KIMI_API_BASE`: Server URL (default: https://api.moonshot.cn)
//! - `KIMI_MODEL`: Model name (default: kimi-k2)
//! - `KIMI_TIMEOUT_SECS`: Request timeout in seconds (default: 10)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::CompletionBackend;

const DEFAULT_API_BASE: &str = "https://api.moonshot.cn";
const DEFAULT_MODEL: &str = "kimi-k2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sampling temperature kept low to favor stable advisory phrasing
const TEMPERATURE: f32 = 0.2;

/// Maximum provider error body carried in diagnostics
const MAX_ERROR_BODY: usize = 256;

/// Kimi chat-completions backend
#[derive(Clone)]
pub struct KimiBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl KimiBackend {
    /// Create a new Kimi backend with the given per-request timeout
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// Create from environment variables
    ///
    /// Required: `KIMI_API_KEY`
    /// Optional: `KIMI_API_BASE`, `KIMI_MODEL`, `KIMI_TIMEOUT_SECS`
    pub fn from_env() -> Option<Self> {
        Self::from_settings(
            std::env::var("KIMI_API_KEY").ok(),
            std::env::var("KIMI_API_BASE").ok(),
            std::env::var("KIMI_MODEL").ok(),
            std::env::var("KIMI_TIMEOUT_SECS").ok(),
        )
    }

    /// Build from raw settings values, applying defaults
    ///
    /// A missing or empty api key yields None; an unparseable or zero
    /// timeout falls back to the default.
    fn from_settings(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        timeout_secs: Option<String>,
    ) -> Option<Self> {
        let api_key = api_key.filter(|k| !k.is_empty())?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout = timeout_secs
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Some(Self::new(&base_url, &model, &api_key, timeout))
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body
}

#[async_trait]
impl CompletionBackend for KimiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let body = response.text().await?;
        let chat_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("unexpected body shape: {}", e)))?;
        debug!(model = %self.model, "Kimi completion received");

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::MalformedResponse("response contained no choices".into()))?;

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(Error::MalformedResponse("completion text was empty".into()));
        }

        Ok(content)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockCompletionServer, MockProviderBehavior};

    fn backend_for(server: &MockCompletionServer, timeout: Duration) -> KimiBackend {
        KimiBackend::new(&server.url(), "kimi-k2", "test-key", timeout)
    }

    #[test]
    fn test_backend_new_trims_trailing_slash() {
        let backend = KimiBackend::new(
            "https://api.moonshot.cn/",
            "kimi-k2",
            "key",
            DEFAULT_TIMEOUT,
        );
        assert_eq!(backend.host(), "https://api.moonshot.cn");
        assert_eq!(backend.model(), "kimi-k2");
    }

    #[test]
    fn test_settings_missing_key() {
        assert!(KimiBackend::from_settings(None, None, None, None).is_none());
        assert!(KimiBackend::from_settings(Some(String::new()), None, None, None).is_none());
    }

    #[test]
    fn test_settings_defaults() {
        let backend = KimiBackend::from_settings(Some("key".into()), None, None, None).unwrap();
        assert_eq!(backend.host(), DEFAULT_API_BASE);
        assert_eq!(backend.model(), DEFAULT_MODEL);
        assert_eq!(backend.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_settings_timeout_parsing() {
        let backend = KimiBackend::from_settings(
            Some("key".into()),
            None,
            None,
            Some("30".into()),
        )
        .unwrap();
        assert_eq!(backend.timeout, Duration::from_secs(30));

        // Unparseable or zero values fall back to the default
        for bad in ["0", "-5", "soon"] {
            let backend = KimiBackend::from_settings(
                Some("key".into()),
                None,
                None,
                Some(bad.to_string()),
            )
            .unwrap();
            assert_eq!(backend.timeout, DEFAULT_TIMEOUT);
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "kimi-k2".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Hello".to_string(),
            }],
            temperature: 0.2,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "kimi-k2");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        let temp = json["temperature"].as_f64().unwrap();
        assert!((temp - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "cmpl-123",
            "object": "chat.completion",
            "model": "kimi-k2",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Stable outlook."
                },
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Stable outlook.");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server =
            MockCompletionServer::start(MockProviderBehavior::Reply("Stable outlook.".into()))
                .await;
        let backend = backend_for(&server, DEFAULT_TIMEOUT);

        let reply = backend.complete("digest").await.unwrap();
        assert_eq!(reply, "Stable outlook.");
    }

    #[tokio::test]
    async fn test_complete_missing_choices_is_malformed() {
        let server = MockCompletionServer::start(MockProviderBehavior::Malformed).await;
        let backend = backend_for(&server, DEFAULT_TIMEOUT);

        let err = backend.complete("digest").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_provider_error_status() {
        let server = MockCompletionServer::start(MockProviderBehavior::Status(500)).await;
        let backend = backend_for(&server, DEFAULT_TIMEOUT);

        let err = backend.complete("digest").await.unwrap_err();
        match err {
            Error::Provider { status, .. } => assert_eq!(status, 500),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        let server = MockCompletionServer::start(MockProviderBehavior::Delay(
            Duration::from_secs(5),
            "too late".into(),
        ))
        .await;
        let backend = backend_for(&server, Duration::from_millis(250));

        let err = backend.complete("digest").await.unwrap_err();
        match err {
            Error::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let backend = KimiBackend::new(
            "http://127.0.0.1:1",
            "kimi-k2",
            "key",
            Duration::from_millis(250),
        );
        assert!(!backend.health_check().await);
    }
}
