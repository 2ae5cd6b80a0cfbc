use tracing_subscriber::EnvFilter;

/// Directive applied on top of `RUST_LOG`; stdout belongs to the agent
/// protocol, so only warnings and errors are shown by default.
pub const DEFAULT_DIRECTIVE: &str = "srsmon=warn";

pub fn env_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive(DEFAULT_DIRECTIVE.parse()?))
}

/// Installs the stderr subscriber for the agent binary.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter()?)
        .init();
    Ok(())
}
