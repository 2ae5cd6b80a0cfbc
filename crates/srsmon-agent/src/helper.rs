use crate::state::{self, PluginState};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use srsmon_collector::Plugin;
use srsmon_common::types::{GraphDescriptor, MetricDescriptor, MetricSample};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable the agent sets when it asks for graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

const META_HEADER: &str = "# mackerel-agent-plugin";

/// Rates over a longer gap than this are not reported.
const MAX_DIFF_SECS: i64 = 600;

#[derive(Serialize)]
struct GraphDefinitionDocument {
    graphs: BTreeMap<String, GraphDescriptor>,
}

/// Drives a [`Plugin`] for one agent invocation.
pub struct PluginHelper<P> {
    plugin: P,
    tempfile: PathBuf,
}

impl<P: Plugin> PluginHelper<P> {
    /// Without an explicit `tempfile` the state lives under the system temp
    /// directory, named after the plugin's metric key prefix.
    pub fn new(plugin: P, tempfile: Option<PathBuf>) -> Self {
        let tempfile = tempfile.unwrap_or_else(|| state::default_path(plugin.metric_key_prefix()));
        Self { plugin, tempfile }
    }

    /// Prints graph definitions when the agent asks for them, values otherwise.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        if meta_requested(std::env::var(META_ENV).ok().as_deref()) {
            self.output_definitions(out)
        } else {
            self.output_values(out, Utc::now())
        }
    }

    pub fn output_definitions<W: Write>(&self, out: &mut W) -> Result<()> {
        let document = GraphDefinitionDocument {
            graphs: self.prefixed_graphs(),
        };
        writeln!(out, "{META_HEADER}")?;
        writeln!(out, "{}", serde_json::to_string(&document)?)?;
        Ok(())
    }

    /// Polls the plugin and prints one line per value.
    ///
    /// The state file is only read and written when some metric is a rate.
    pub fn output_values<W: Write>(&self, out: &mut W, now: DateTime<Utc>) -> Result<()> {
        let sample = self.plugin.fetch_metrics()?;
        let last = if self.has_diff() {
            let last = PluginState::load(&self.tempfile);
            PluginState::new(sample.clone(), now).save(&self.tempfile)?;
            last
        } else {
            None
        };

        for line in self.format_values(&sample, last.as_ref(), now) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Formats `sample` as `key\tvalue\ttimestamp` lines, sorted by key.
    ///
    /// Metrics missing from the sample are skipped, as are rate metrics that
    /// cannot be computed against `last`.
    pub fn format_values(
        &self,
        sample: &MetricSample,
        last: Option<&PluginState>,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let prefix = self.plugin.metric_key_prefix();
        let mut lines = Vec::new();

        for (graph_name, graph) in self.plugin.graph_definition() {
            for metric in &graph.metrics {
                let Some(&raw) = sample.get(&metric.name) else {
                    continue;
                };
                let Some(value) = metric_value(metric, raw, last, now) else {
                    continue;
                };
                let key = format!("{prefix}.{graph_name}.{}", metric.name);
                if let Some(line) = format_line(&key, value, now.timestamp()) {
                    lines.push(line);
                }
            }
        }

        lines.sort();
        lines
    }

    /// Returns true if any graph metric is reported as a per-minute rate.
    pub fn has_diff(&self) -> bool {
        self.plugin
            .graph_definition()
            .values()
            .any(|graph| graph.metrics.iter().any(|m| m.diff))
    }

    fn prefixed_graphs(&self) -> BTreeMap<String, GraphDescriptor> {
        let prefix = self.plugin.metric_key_prefix();
        self.plugin
            .graph_definition()
            .into_iter()
            .map(|(name, mut graph)| {
                let key = if name.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{prefix}.{name}")
                };
                if graph.label.is_empty() {
                    graph.label = key.clone();
                }
                for metric in &mut graph.metrics {
                    if metric.label.is_empty() {
                        metric.label = metric.name.clone();
                    }
                }
                (key, graph)
            })
            .collect()
    }
}

/// The agent asks for graph definitions by setting [`META_ENV`] to any
/// non-empty value.
pub fn meta_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn metric_value(
    metric: &MetricDescriptor,
    raw: f64,
    last: Option<&PluginState>,
    now: DateTime<Utc>,
) -> Option<f64> {
    let mut value = raw;
    if metric.diff {
        let last = last?;
        let last_value = *last.values.get(&metric.name)?;
        value = per_minute_rate(raw, last_value, now.timestamp() - last.last_time)?;
    }
    if let Some(scale) = metric.scale {
        value *= scale;
    }
    Some(value)
}

/// Change per minute between two readings, or `None` when the counter went
/// backwards or the readings are too far apart.
pub fn per_minute_rate(value: f64, last_value: f64, elapsed_secs: i64) -> Option<f64> {
    if elapsed_secs <= 0 || elapsed_secs > MAX_DIFF_SECS {
        tracing::debug!(elapsed_secs, "Skipping rate over unusable interval");
        return None;
    }
    if value < last_value {
        tracing::debug!(value, last_value, "Counter went backwards");
        return None;
    }
    Some((value - last_value) * 60.0 / elapsed_secs as f64)
}

/// One protocol line; whole numbers print without a fractional part.
pub fn format_line(key: &str, value: f64, timestamp: i64) -> Option<String> {
    if !value.is_finite() {
        tracing::warn!(key, value, "Invalid metric value");
        return None;
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(format!("{key}\t{}\t{timestamp}", value as i64))
    } else {
        Some(format!("{key}\t{value:.6}\t{timestamp}"))
    }
}
