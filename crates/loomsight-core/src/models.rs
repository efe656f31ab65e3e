//! Dashboard response models and demo data
//!
//! These are the payloads the REST API serves. The demo constructors
//! return the static figures the dashboard front-end was built against;
//! a production deployment would replace them with real factory feeds.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Headline KPIs shown at the top of the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KpiSummary {
    pub yield_pct: f64,
    pub on_time_delivery: f64,
    pub total_wastage: f64,
    pub order_fill_rate: f64,
}

impl KpiSummary {
    pub fn demo() -> Self {
        Self {
            yield_pct: 94.2,
            on_time_delivery: 88.5,
            total_wastage: 5.8,
            order_fill_rate: 91.2,
        }
    }
}

/// One material line in the inventory breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCategory {
    pub name: String,
    pub stock: f64,
    pub unit: String,
    pub status: String,
}

impl MaterialCategory {
    fn new(name: &str, stock: f64, unit: &str, status: &str) -> Self {
        Self {
            name: name.to_string(),
            stock,
            unit: unit.to_string(),
            status: status.to_string(),
        }
    }
}

/// Current inventory status across all materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStatus {
    pub raw_material_stock: f64,
    pub finished_goods: f64,
    pub work_in_progress: f64,
    pub warehouse_utilization: f64,
    pub material_categories: Vec<MaterialCategory>,
}

impl InventoryStatus {
    pub fn demo() -> Self {
        Self {
            raw_material_stock: 85.3,
            finished_goods: 42.7,
            work_in_progress: 23.5,
            warehouse_utilization: 78.2,
            material_categories: vec![
                MaterialCategory::new("Cotton Yarn", 450.0, "kg", "Sufficient"),
                MaterialCategory::new("Synthetic Yarn", 320.0, "kg", "Sufficient"),
                MaterialCategory::new("Dyes", 125.0, "L", "Low"),
                MaterialCategory::new("Finishing Chemicals", 87.0, "L", "Sufficient"),
            ],
        }
    }
}

/// A single system alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Alert feed with severity counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertFeed {
    pub critical_alerts: u32,
    pub warnings: u32,
    pub info_messages: u32,
    pub alerts: Vec<Alert>,
}

impl AlertFeed {
    pub fn demo() -> Self {
        let now = Utc::now();
        Self {
            critical_alerts: 0,
            warnings: 1,
            info_messages: 3,
            alerts: vec![
                Alert {
                    kind: "warning".to_string(),
                    title: "Low Dye Stock".to_string(),
                    message: "Dye inventory at 45% capacity".to_string(),
                    timestamp: now - Duration::minutes(18),
                },
                Alert {
                    kind: "info".to_string(),
                    title: "Loom C Maintenance".to_string(),
                    message: "Scheduled maintenance completed".to_string(),
                    timestamp: now - Duration::hours(1) - Duration::minutes(30),
                },
                Alert {
                    kind: "info".to_string(),
                    title: "Order Fulfilled".to_string(),
                    message: "Order #12345 ready for shipment".to_string(),
                    timestamp: now - Duration::hours(2) - Duration::minutes(45),
                },
                Alert {
                    kind: "info".to_string(),
                    title: "Shift Change".to_string(),
                    message: "Evening shift clocked in on schedule".to_string(),
                    timestamp: now - Duration::hours(4),
                },
            ],
        }
    }
}

/// Daily production targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTargets {
    pub units_produced: u32,
    pub units_target: u32,
    pub achievement: f64,
}

/// Week-over-week KPI trends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiTrends {
    pub yield_trend: String,
    pub otd_trend: String,
    pub wastage_trend: String,
    pub efficiency_trend: String,
}

/// Detailed performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub overall_efficiency: f64,
    pub production_capacity_utilization: f64,
    pub equipment_health: f64,
    pub labor_productivity: f64,
    pub daily_targets: DailyTargets,
    pub kpi_trends: KpiTrends,
}

impl PerformanceReport {
    pub fn demo() -> Self {
        Self {
            overall_efficiency: 91.7,
            production_capacity_utilization: 85.4,
            equipment_health: 94.2,
            labor_productivity: 88.6,
            daily_targets: DailyTargets {
                units_produced: 2450,
                units_target: 2500,
                achievement: 98.0,
            },
            kpi_trends: KpiTrends {
                yield_trend: "+1.2%".to_string(),
                otd_trend: "-0.3%".to_string(),
                wastage_trend: "-0.5%".to_string(),
                efficiency_trend: "+0.8%".to_string(),
            },
        }
    }
}

/// Daily report payload for PDF/CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub report_title: String,
    pub report_date: NaiveDate,
    pub period: String,
    pub summary: serde_json::Value,
    pub export_available_formats: Vec<String>,
}

impl DailyReport {
    pub fn demo() -> Self {
        Self {
            report_title: "Textile Production Daily Report".to_string(),
            report_date: Utc::now().date_naive(),
            period: "Daily".to_string(),
            summary: serde_json::json!({
                "kpis": {"yield": 94.2, "otd": 88.5, "wastage": 5.8, "fill_rate": 91.2},
                "production": {"units_produced": 2450, "target": 2500},
                "quality": {"defect_rate": 2.1, "consistency": 96.4}
            }),
            export_available_formats: vec![
                "PDF".to_string(),
                "CSV".to_string(),
                "XLSX".to_string(),
            ],
        }
    }
}
