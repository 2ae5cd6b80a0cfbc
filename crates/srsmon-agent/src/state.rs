use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srsmon_common::types::MetricSample;
use std::path::{Path, PathBuf};

/// Values of the previous poll, kept for per-minute rate metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginState {
    /// Unix seconds of the previous poll
    pub last_time: i64,
    pub values: MetricSample,
}

/// State file used when none is given on the command line.
pub fn default_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mackerel-plugin-{prefix}"))
}

impl PluginState {
    pub fn new(values: MetricSample, now: DateTime<Utc>) -> Self {
        Self {
            last_time: now.timestamp(),
            values,
        }
    }

    /// Loads the previous state. A missing or unreadable file means no state.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read state file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt state file");
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        Ok(())
    }
}
