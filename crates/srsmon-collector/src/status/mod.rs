//! Polling of the appliance `get_server_status` API.
//!
//! [`ServerStatusPlugin`] ties together the request builder, the report
//! fetcher and the line parser. The differences between deployments of this
//! plugin (disk support, direct URI override, handling of incomplete memory
//! data) are explicit [`CollectorOptions`] toggles.

pub mod fetch;
pub mod graphs;
pub mod parser;
pub mod request;

use crate::error::Result;
use crate::Plugin;
use fetch::ReportFetcher;
use parser::StatusReportParser;
use request::StatusTarget;
use serde::Deserialize;
use srsmon_common::types::{GraphDescriptor, MetricSample};
use std::collections::BTreeMap;

/// Metric key prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "cuenote-srs";

/// How memory metrics are reported when the report lacks some memory fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryPolicy {
    /// Emit the memory metrics only when all four fields were seen.
    #[default]
    RequireComplete,
    /// Always emit the memory metrics, reading absent fields as zero.
    ZeroFill,
}

/// Behaviour toggles for [`ServerStatusPlugin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CollectorOptions {
    #[serde(default = "default_true")]
    pub disk_enabled: bool,
    #[serde(default = "default_true")]
    pub allow_uri_override: bool,
    #[serde(default)]
    pub memory_policy: MemoryPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            disk_enabled: true,
            allow_uri_override: true,
            memory_policy: MemoryPolicy::default(),
        }
    }
}

pub struct ServerStatusPlugin {
    prefix: String,
    target: StatusTarget,
    allow_uri_override: bool,
    fetcher: ReportFetcher,
    parser: StatusReportParser,
    disk_enabled: bool,
}

impl ServerStatusPlugin {
    /// Builds the HTTP client. The target is resolved on each fetch, so graph
    /// definitions are available even when no target is configured.
    ///
    /// An empty `prefix` falls back to [`DEFAULT_PREFIX`].
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(prefix: &str, target: &StatusTarget, options: CollectorOptions) -> Result<Self> {
        let prefix = if prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            prefix.to_string()
        };

        Ok(Self {
            prefix,
            target: target.clone(),
            allow_uri_override: options.allow_uri_override,
            fetcher: ReportFetcher::new()?,
            parser: StatusReportParser::new(options.disk_enabled, options.memory_policy),
            disk_enabled: options.disk_enabled,
        })
    }

    /// The URL a fetch will request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CollectorError::Config`] if the target cannot
    /// be resolved under the configured options.
    pub fn url(&self) -> Result<String> {
        self.target.url(self.allow_uri_override)
    }
}

impl Plugin for ServerStatusPlugin {
    fn metric_key_prefix(&self) -> &str {
        &self.prefix
    }

    fn fetch_metrics(&self) -> Result<MetricSample> {
        let url = self.url()?;
        let body = self.fetcher.fetch(&url)?;
        Ok(self.parser.parse(&body))
    }

    fn graph_definition(&self) -> BTreeMap<String, GraphDescriptor> {
        graphs::graph_definition(self.disk_enabled)
    }
}
