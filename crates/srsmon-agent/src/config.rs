use anyhow::Context;
use serde::Deserialize;
use srsmon_collector::status::CollectorOptions;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct AgentConfig {
    /// Variant toggles for the status collector
    #[serde(default)]
    pub collector: CollectorOptions,
}

impl AgentConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
