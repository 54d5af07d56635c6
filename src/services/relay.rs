use crate::config::RelaySettings;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while relaying a request upstream
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

/// Outbound side of the CORS relay
///
/// Performs exactly one GET per call and hands back the body untouched.
/// The upstream status code is deliberately ignored.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
}

impl RelayClient {
    /// Create a new relay client
    pub fn new(settings: &RelaySettings) -> Result<Self, RelayError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());

        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(RelayError::Client)?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its full body as text
    pub async fn fetch(&self, url: &str) -> Result<String, RelayError> {
        tracing::debug!("Relaying GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("Upstream {} answered {} ({} bytes)", url, status, body.len());

        Ok(body)
    }
}
