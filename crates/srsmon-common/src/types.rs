use serde::Serialize;
use std::collections::HashMap;

/// One poll's worth of metric values, keyed by metric name (e.g. `mem_used`).
pub type MetricSample = HashMap<String, f64>;

/// Display unit of a graph, as understood by the monitoring agent.
///
/// # Examples
///
/// ```
/// use srsmon_common::types::Unit;
///
/// assert_eq!(Unit::Bytes.to_string(), "bytes");
/// assert_eq!(Unit::BytesPerSec.as_str(), "bytes/sec");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "bytes/sec")]
    BytesPerSec,
    #[serde(rename = "iops")]
    Iops,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Float => "float",
            Unit::Integer => "integer",
            Unit::Percentage => "percentage",
            Unit::Bytes => "bytes",
            Unit::BytesPerSec => "bytes/sec",
            Unit::Iops => "iops",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hints for a single metric inside a graph.
///
/// `diff` and `scale` are consumed by the harness when printing values and
/// are not part of the serialized graph definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDescriptor {
    pub name: String,
    pub label: String,
    #[serde(skip)]
    pub diff: bool,
    pub stacked: bool,
    #[serde(skip)]
    pub scale: Option<f64>,
}

impl MetricDescriptor {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            diff: false,
            stacked: false,
            scale: None,
        }
    }

    pub fn diff(mut self) -> Self {
        self.diff = true;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn scale(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }
}

/// Static description of how a group of related metrics is labelled and drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDescriptor {
    pub label: String,
    pub unit: Unit,
    pub metrics: Vec<MetricDescriptor>,
}

impl GraphDescriptor {
    pub fn new(label: &str, unit: Unit, metrics: Vec<MetricDescriptor>) -> Self {
        Self {
            label: label.to_string(),
            unit,
            metrics,
        }
    }

    /// Returns true if this graph describes a metric named `name`.
    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.iter().any(|m| m.name == name)
    }
}
