//! Digest formatter
//!
//! Pure function turning the current KPIs plus any module snapshots into
//! the compact textual summary sent to the completion service. No I/O.
//!
//! Determinism contract: identical inputs produce byte-identical output.
//! Field order is fixed (KPIs first, then snapshots in the order given,
//! with keys in `BTreeMap` order) and all numbers render at one decimal.

use std::fmt::Write;

use crate::metrics::{MetricSnapshot, MetricValue};
use crate::models::KpiSummary;

/// Upper bound on digest length in bytes
pub const DIGEST_MAX_LEN: usize = 512;

/// Format the bounded-length digest for a set of metric snapshots
pub fn format_digest(kpis: &KpiSummary, snapshots: &[MetricSnapshot]) -> String {
    let mut digest = format!(
        "Yield: {:.1}%, Wastage: {:.1}%, OTD: {:.1}%, Fill rate: {:.1}%",
        kpis.yield_pct, kpis.total_wastage, kpis.on_time_delivery, kpis.order_fill_rate
    );

    for snapshot in snapshots {
        let _ = write!(digest, "; {}:", snapshot.module);
        let mut first = true;
        for (name, value) in &snapshot.values {
            let sep = if first { " " } else { ", " };
            first = false;
            match value {
                MetricValue::Number(n) => {
                    let _ = write!(digest, "{}{} {:.1}", sep, name, n);
                }
                MetricValue::Text(t) => {
                    let _ = write!(digest, "{}{} {}", sep, name, t);
                }
            }
        }
    }

    truncate_to_bound(digest)
}

fn truncate_to_bound(mut s: String) -> String {
    if s.len() <= DIGEST_MAX_LEN {
        return s;
    }
    let mut end = DIGEST_MAX_LEN;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Module;

    fn sample_snapshot() -> MetricSnapshot {
        MetricSnapshot::new(Module::Quality)
            .with("defect_rate", 2.1)
            .with("consistency", 96.4)
    }

    #[test]
    fn test_digest_kpi_section() {
        let digest = format_digest(&KpiSummary::demo(), &[]);
        assert_eq!(
            digest,
            "Yield: 94.2%, Wastage: 5.8%, OTD: 88.5%, Fill rate: 91.2%"
        );
    }

    #[test]
    fn test_digest_includes_snapshot_fields_in_key_order() {
        let digest = format_digest(&KpiSummary::demo(), &[sample_snapshot()]);
        assert!(digest.ends_with("; quality: consistency 96.4, defect_rate 2.1"));
    }

    #[test]
    fn test_digest_is_deterministic() {
        let snapshots = vec![sample_snapshot(), sample_snapshot()];
        let a = format_digest(&KpiSummary::demo(), &snapshots);
        let b = format_digest(&KpiSummary::demo(), &snapshots);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_digest_rounds_to_one_decimal() {
        let kpis = KpiSummary {
            yield_pct: 94.249,
            on_time_delivery: 88.55,
            total_wastage: 5.0,
            order_fill_rate: 91.0,
        };
        let digest = format_digest(&kpis, &[]);
        assert!(digest.starts_with("Yield: 94.2%, Wastage: 5.0%"));
    }

    #[test]
    fn test_digest_is_bounded() {
        let mut snapshot = MetricSnapshot::new(Module::Marketing);
        for i in 0..200 {
            snapshot = snapshot.with(&format!("metric_with_a_long_name_{:03}", i), 12.3);
        }
        let digest = format_digest(&KpiSummary::demo(), &[snapshot]);
        assert!(digest.len() <= DIGEST_MAX_LEN);
    }

    #[test]
    fn test_digest_renders_text_values() {
        let snapshot = MetricSnapshot::new(Module::Inventory).with("dye_stock", "Low");
        let digest = format_digest(&KpiSummary::demo(), &[snapshot]);
        assert!(digest.ends_with("; inventory: dye_stock Low"));
    }
}
