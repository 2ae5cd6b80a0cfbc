//! Server-status collection for the srsmon agent.
//!
//! A [`Plugin`] polls one appliance and returns a [`MetricSample`] together
//! with the static graph definitions describing how those metrics render.
//! The agent harness drives any [`Plugin`] without knowing how the values
//! were obtained.

pub mod error;
pub mod status;


use srsmon_common::types::{GraphDescriptor, MetricSample};
use std::collections::BTreeMap;

/// A metrics source the agent harness can invoke once per poll.
pub trait Plugin {
    /// Prefix prepended to every graph and metric key (e.g. `"cuenote-srs"`).
    fn metric_key_prefix(&self) -> &str;

    /// Polls the target and returns the current metric values.
    ///
    /// # Errors
    ///
    /// Returns an error if the target could not be reached or its response
    /// body could not be read.
    fn fetch_metrics(&self) -> error::Result<MetricSample>;

    /// Returns the graph definitions keyed by graph name, without the prefix.
    fn graph_definition(&self) -> BTreeMap<String, GraphDescriptor>;
}
