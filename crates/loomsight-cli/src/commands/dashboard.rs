//! Dashboard command implementation

use anyhow::Result;

use loomsight_core::{KpiSummary, MetricValue, ProviderRegistry};

pub fn cmd_dashboard() -> Result<()> {
    let kpis = KpiSummary::demo();

    println!("📊 Loomsight Dashboard");
    println!();
    println!("Headline KPIs:");
    println!("   Yield:            {:>6.1}%", kpis.yield_pct);
    println!("   On-time delivery: {:>6.1}%", kpis.on_time_delivery);
    println!("   Total wastage:    {:>6.1}%", kpis.total_wastage);
    println!("   Order fill rate:  {:>6.1}%", kpis.order_fill_rate);

    let registry = ProviderRegistry::demo();
    for snapshot in registry.snapshots() {
        println!();
        println!("{}:", snapshot.module);
        for (name, value) in &snapshot.values {
            match value {
                MetricValue::Number(n) => println!("   {:<24} {:>8.1}", name, n),
                MetricValue::Text(t) => println!("   {:<24} {:>8}", name, t),
            }
        }
    }

    Ok(())
}
