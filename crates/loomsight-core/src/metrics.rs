//! Metric snapshot model and data providers
//!
//! Each operational module (quality, production, inventory, planning,
//! finance, marketing) is backed by a `MetricsProvider` that produces a
//! fresh `MetricSnapshot` on every request. Snapshots have no persisted
//! identity; their lifetime is one request.
//!
//! Values are kept in a `BTreeMap` so that iteration order is stable,
//! which the digest formatter relies on.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operational modules of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Quality,
    Production,
    Inventory,
    Planning,
    Finance,
    Marketing,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Quality => "quality",
            Module::Production => "production",
            Module::Inventory => "inventory",
            Module::Planning => "planning",
            Module::Finance => "finance",
            Module::Marketing => "marketing",
        }
    }

    /// All modules in stable display order
    pub fn all() -> [Module; 6] {
        [
            Module::Quality,
            Module::Production,
            Module::Inventory,
            Module::Planning,
            Module::Finance,
            Module::Marketing,
        ]
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quality" => Ok(Module::Quality),
            "production" => Ok(Module::Production),
            "inventory" => Ok(Module::Inventory),
            "planning" => Ok(Module::Planning),
            "finance" => Ok(Module::Finance),
            "marketing" => Ok(Module::Marketing),
            _ => Err(format!("Unknown module: {}", s)),
        }
    }
}

/// A single metric value: numeric or textual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

/// A point-in-time set of named metric values for one module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub module: Module,
    pub values: BTreeMap<String, MetricValue>,
}

impl MetricSnapshot {
    pub fn new(module: Module) -> Self {
        Self {
            module,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }
}

/// Capability: supplies current metrics for one module
///
/// The server holds one provider per module and queries them on demand.
/// Providers are read-only collaborators; the insight aggregator does not
/// validate their internal correctness, only their presence.
pub trait MetricsProvider: Send + Sync {
    fn module(&self) -> Module;
    fn snapshot(&self) -> MetricSnapshot;
}

/// Demo provider backed by static dashboard data
pub struct DemoProvider {
    module: Module,
}

impl DemoProvider {
    pub fn new(module: Module) -> Self {
        Self { module }
    }
}

impl MetricsProvider for DemoProvider {
    fn module(&self) -> Module {
        self.module
    }

    fn snapshot(&self) -> MetricSnapshot {
        match self.module {
            Module::Quality => MetricSnapshot::new(Module::Quality)
                .with("defect_rate", 2.1)
                .with("consistency", 96.4)
                .with("yield_pct", 94.2),
            Module::Production => MetricSnapshot::new(Module::Production)
                .with("units_produced", 2450.0)
                .with("units_target", 2500.0)
                .with("capacity_utilization", 85.4)
                .with("overall_efficiency", 91.7),
            Module::Inventory => MetricSnapshot::new(Module::Inventory)
                .with("raw_material_stock", 85.3)
                .with("finished_goods", 42.7)
                .with("work_in_progress", 23.5)
                .with("warehouse_utilization", 78.2),
            Module::Planning => MetricSnapshot::new(Module::Planning)
                .with("on_time_delivery", 88.5)
                .with("order_fill_rate", 91.2)
                .with("schedule_adherence", 92.3),
            Module::Finance => MetricSnapshot::new(Module::Finance)
                .with("margin_pct", 18.4)
                .with("cost_variance_pct", -1.2)
                .with("revenue_attainment", 96.8),
            Module::Marketing => MetricSnapshot::new(Module::Marketing)
                .with("new_orders", 37.0)
                .with("repeat_order_rate", 64.5)
                .with("sample_requests", 12.0),
        }
    }
}

/// Registry of metric providers, one per module
pub struct ProviderRegistry {
    providers: Vec<Box<dyn MetricsProvider>>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Box<dyn MetricsProvider>>) -> Self {
        Self { providers }
    }

    /// Registry with demo providers for all six modules
    pub fn demo() -> Self {
        Self::new(
            Module::all()
                .into_iter()
                .map(|m| Box::new(DemoProvider::new(m)) as Box<dyn MetricsProvider>)
                .collect(),
        )
    }

    pub fn snapshot(&self, module: Module) -> Option<MetricSnapshot> {
        self.providers
            .iter()
            .find(|p| p.module() == module)
            .map(|p| p.snapshot())
    }

    /// Snapshots from every registered provider, in registration order
    pub fn snapshots(&self) -> Vec<MetricSnapshot> {
        self.providers.iter().map(|p| p.snapshot()).collect()
    }
}
