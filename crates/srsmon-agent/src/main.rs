use anyhow::Result;
use clap::Parser;
use srsmon_agent::cli::Cli;
use srsmon_agent::config::AgentConfig;
use srsmon_agent::helper::PluginHelper;
use srsmon_agent::logging;
use srsmon_collector::status::ServerStatusPlugin;
use std::io::Write;

fn main() -> Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    tracing::debug!(options = ?config.collector, "srsmon-agent starting");

    let plugin = ServerStatusPlugin::new(&cli.metric_key_prefix, &cli.target(), config.collector)?;
    let helper = PluginHelper::new(plugin, cli.tempfile.clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    helper.run(&mut out)?;
    out.flush()?;
    Ok(())
}
