use clap::Parser;
use srsmon_collector::status::request::{StatusTarget, DEFAULT_PATH};
use srsmon_collector::status::DEFAULT_PREFIX;
use std::path::PathBuf;

/// Report Cuenote SR-S server status as Mackerel metrics.
#[derive(Debug, Parser)]
#[command(name = "srsmon-agent", version)]
pub struct Cli {
    /// Full status URI; replaces host, path and credentials
    #[arg(long, default_value = "")]
    pub uri: String,

    /// Appliance hostname
    #[arg(long, default_value = "")]
    pub host: String,

    /// Status API path
    #[arg(long, default_value = DEFAULT_PATH)]
    pub path: String,

    #[arg(long, default_value = "")]
    pub username: String,

    #[arg(long, env = "SRSMON_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    #[arg(long = "metric-key-prefix", default_value = DEFAULT_PREFIX)]
    pub metric_key_prefix: String,

    /// Previous-value state file
    #[arg(long)]
    pub tempfile: Option<PathBuf>,

    /// TOML file with collector options
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn target(&self) -> StatusTarget {
        StatusTarget {
            uri: (!self.uri.is_empty()).then(|| self.uri.clone()),
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            path: self.path.clone(),
        }
    }
}
