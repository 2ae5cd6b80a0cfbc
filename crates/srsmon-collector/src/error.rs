/// Errors that can occur while polling an appliance.
///
/// # Examples
///
/// ```rust
/// use srsmon_collector::error::CollectorError;
///
/// let err = CollectorError::Config("host is required".to_string());
/// assert!(err.to_string().contains("host is required"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Connection, DNS, URL or body-read failure from `reqwest`.
    #[error("Collector: transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The polling target is missing or contradicts the configured toggles.
    #[error("Collector: invalid configuration: {0}")]
    Config(String),
}

/// Convenience `Result` alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;
