//! Insight command implementation

use anyhow::Result;

use loomsight_core::{InsightAggregator, KpiSummary, ProviderRegistry, RiskLevel};

pub async fn cmd_insight(json: bool) -> Result<()> {
    let aggregator = InsightAggregator::from_env();
    let registry = ProviderRegistry::demo();

    let result = aggregator
        .get_insight(&KpiSummary::demo(), &registry.snapshots())
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let marker = match result.risk_level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
        RiskLevel::Unknown => "⚪",
        RiskLevel::Error => "❌",
        RiskLevel::NotConfigured => "ℹ️ ",
    };

    println!("{} Risk level: {}", marker, result.risk_level);
    println!();
    println!("{}", result.prediction);

    Ok(())
}
