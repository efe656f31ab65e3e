//! Predictive insight aggregation
//!
//! Turns the current metric snapshots into a short natural-language
//! prediction plus a coarse risk classification. The aggregator tolerates
//! total unavailability of the completion provider: every failure path
//! yields a well-formed `InsightResult`, never an error to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::{CompletionBackend, CompletionClient};
use crate::digest::format_digest;
use crate::metrics::MetricSnapshot;
use crate::models::KpiSummary;

/// Wastage above this classifies High risk
const WASTAGE_HIGH: f64 = 8.0;
/// Wastage above this classifies Medium risk
const WASTAGE_MEDIUM: f64 = 6.0;
/// On-time delivery below this classifies High risk
const OTD_HIGH: f64 = 80.0;
/// On-time delivery below this classifies Medium risk
const OTD_MEDIUM: f64 = 85.0;

/// Coarse operational risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
    Error,
    NotConfigured,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
            RiskLevel::Error => "Error",
            RiskLevel::NotConfigured => "NotConfigured",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            "Unknown" => Ok(RiskLevel::Unknown),
            "Error" => Ok(RiskLevel::Error),
            "NotConfigured" => Ok(RiskLevel::NotConfigured),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Risk-annotated prediction returned to the dashboard
///
/// `prediction` is non-empty on every path, including failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResult {
    pub prediction: String,
    pub risk_level: RiskLevel,
}

/// Classify operational risk from the KPI thresholds
///
/// Independent of the completion call so it stays unit-testable offline.
pub fn derive_risk(kpis: &KpiSummary) -> RiskLevel {
    if kpis.total_wastage > WASTAGE_HIGH || kpis.on_time_delivery < OTD_HIGH {
        RiskLevel::High
    } else if kpis.total_wastage > WASTAGE_MEDIUM || kpis.on_time_delivery < OTD_MEDIUM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Insight aggregator
///
/// Stateless between invocations; holds only the injected completion
/// client. Safe to share across concurrent requests.
pub struct InsightAggregator {
    client: Option<CompletionClient>,
}

impl InsightAggregator {
    /// Create an aggregator with an injected completion client
    ///
    /// `None` models the supported no-credential state.
    pub fn new(client: Option<CompletionClient>) -> Self {
        Self { client }
    }

    /// Create from environment variables (see `CompletionClient::from_env`)
    pub fn from_env() -> Self {
        Self::new(CompletionClient::from_env())
    }

    pub fn client(&self) -> Option<&CompletionClient> {
        self.client.as_ref()
    }

    /// Produce a risk-annotated prediction for the given snapshots
    ///
    /// Exactly one outbound call per invocation, no retries; the dashboard
    /// polls, so a failed call is retried at the next poll instead.
    pub async fn get_insight(
        &self,
        kpis: &KpiSummary,
        snapshots: &[MetricSnapshot],
    ) -> InsightResult {
        let Some(client) = &self.client else {
            return InsightResult {
                prediction: "Kimi API not configured".to_string(),
                risk_level: RiskLevel::NotConfigured,
            };
        };

        let digest = format_digest(kpis, snapshots);
        debug!(digest = %digest, "Requesting predictive insight");

        match client.complete(&build_prompt(&digest)).await {
            Ok(text) => InsightResult {
                prediction: text,
                risk_level: derive_risk(kpis),
            },
            Err(e) => {
                warn!(error = %e, host = %client.host(), "Completion call failed");
                InsightResult {
                    prediction: format!("error calling Kimi API: {}", e),
                    risk_level: RiskLevel::Error,
                }
            }
        }
    }
}

fn build_prompt(digest: &str) -> String {
    format!(
        "You are a production analyst for a textile mill. Current metrics: {}. \
         In at most 50 words, give one actionable operational advisory based \
         on these metrics. Plain text, no markdown.",
        digest
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockBackend, MockReply};
    use crate::metrics::ProviderRegistry;

    fn kpis(wastage: f64, otd: f64) -> KpiSummary {
        KpiSummary {
            yield_pct: 94.2,
            on_time_delivery: otd,
            total_wastage: wastage,
            order_fill_rate: 91.2,
        }
    }

    #[test]
    fn test_risk_level_roundtrip() {
        for level in [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Unknown,
            RiskLevel::Error,
            RiskLevel::NotConfigured,
        ] {
            let parsed: RiskLevel = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_risk_level_serializes_pascal_case() {
        let result = InsightResult {
            prediction: "ok".to_string(),
            risk_level: RiskLevel::NotConfigured,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["risk_level"], "NotConfigured");
    }

    #[test]
    fn test_derive_risk_thresholds() {
        assert_eq!(derive_risk(&kpis(8.5, 79.0)), RiskLevel::High);
        assert_eq!(derive_risk(&kpis(6.5, 86.0)), RiskLevel::Medium);
        assert_eq!(derive_risk(&kpis(3.0, 95.0)), RiskLevel::Low);
    }

    #[test]
    fn test_derive_risk_single_trigger() {
        // Either metric alone can raise the classification
        assert_eq!(derive_risk(&kpis(3.0, 79.5)), RiskLevel::High);
        assert_eq!(derive_risk(&kpis(9.0, 95.0)), RiskLevel::High);
        assert_eq!(derive_risk(&kpis(3.0, 84.9)), RiskLevel::Medium);
    }

    #[test]
    fn test_derive_risk_boundaries_are_exclusive() {
        assert_eq!(derive_risk(&kpis(6.0, 85.0)), RiskLevel::Low);
        assert_eq!(derive_risk(&kpis(8.0, 80.0)), RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_not_configured_short_circuit() {
        let aggregator = InsightAggregator::new(None);
        let result = aggregator.get_insight(&kpis(5.8, 88.5), &[]).await;

        assert_eq!(result.prediction, "Kimi API not configured");
        assert_eq!(result.risk_level, RiskLevel::NotConfigured);
    }

    #[tokio::test]
    async fn test_success_derives_risk_from_thresholds() {
        let mock = MockBackend::with_reply(MockReply::Text("Stable outlook.".into()));
        let aggregator = InsightAggregator::new(Some(CompletionClient::Mock(mock)));

        let result = aggregator.get_insight(&kpis(6.5, 86.0), &[]).await;
        assert_eq!(result.prediction, "Stable outlook.");
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_exactly_one_call_per_invocation() {
        let mock = MockBackend::new();
        let aggregator =
            InsightAggregator::new(Some(CompletionClient::Mock(mock.clone())));
        let registry = ProviderRegistry::demo();

        aggregator
            .get_insight(&KpiSummary::demo(), &registry.snapshots())
            .await;
        assert_eq!(mock.calls(), 1);

        aggregator.get_insight(&KpiSummary::demo(), &[]).await;
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_error_result() {
        let mock = MockBackend::with_reply(MockReply::ProviderError(500));
        let aggregator = InsightAggregator::new(Some(CompletionClient::Mock(mock)));

        let result = aggregator.get_insight(&kpis(5.8, 88.5), &[]).await;
        assert_eq!(result.risk_level, RiskLevel::Error);
        assert!(result.prediction.starts_with("error calling Kimi API:"));
        assert!(!result.prediction.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_maps_to_error_result() {
        let mock = MockBackend::with_reply(MockReply::Malformed);
        let aggregator = InsightAggregator::new(Some(CompletionClient::Mock(mock)));

        let result = aggregator.get_insight(&kpis(5.8, 88.5), &[]).await;
        assert_eq!(result.risk_level, RiskLevel::Error);
        assert!(result.prediction.contains("no choices"));
    }

    #[test]
    fn test_prompt_bounds_the_advisory() {
        let prompt = build_prompt("Yield: 94.2%");
        assert!(prompt.contains("50 words"));
        assert!(prompt.contains("Yield: 94.2%"));
    }
}
