use crate::error::Result;
use reqwest::blocking::Client;

/// Performs the single GET of a poll.
pub struct ReportFetcher {
    client: Client,
}

impl ReportFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the whole response body.
    ///
    /// The status code is not inspected; an error page is parsed like any
    /// other report and simply yields no metrics.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        tracing::debug!(host = %host, "Fetching server status");

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Server status received");
        Ok(body)
    }
}
