// HTTP client for the hams.at upcoming-alerts endpoint.
//
// One authenticated GET per run. Failures come back as errors; the
// pipeline turns them into "no data this run" via fetch_or_log.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, error};

use super::models::{Alert, AlertsEnvelope};

/// Default upcoming-alerts endpoint.
pub const DEFAULT_API_URL: &str = "https://hams.at/api/alerts/upcoming";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Anything that can produce the current list of upcoming alerts.
///
/// HamsatClient is the real implementation; tests drive the pipeline
/// with in-memory fakes.
#[async_trait]
pub trait AlertSource: Send + Sync {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>>;
}

/// Authenticated client for the hams.at alerts API.
pub struct HamsatClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HamsatClient {
    /// Create a client for `api_url`, authenticating with `api_key`.
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hamsalert/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl AlertSource for HamsatClient {
    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        debug!(url = %self.api_url, "Fetching upcoming alerts");

        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .context("hams.at request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("hams.at returned {status}: {body}");
        }

        let envelope = response
            .json::<AlertsEnvelope>()
            .await
            .context("Failed to parse hams.at alerts response")?;

        let alerts = envelope.into_alerts()?;
        debug!(count = alerts.len(), "Fetched upcoming alerts");
        Ok(alerts)
    }
}

/// Fetch alerts, logging and swallowing any failure.
///
/// `None` means "no data this run": callers skip diffing, notifying, and
/// persisting, leaving the seen file untouched.
pub async fn fetch_or_log(source: &dyn AlertSource) -> Option<Vec<Alert>> {
    match source.fetch_alerts().await {
        Ok(alerts) => Some(alerts),
        Err(e) => {
            let chain = format!("{e:#}");
            error!(error = %chain, "Error fetching alerts");
            None
        }
    }
}
