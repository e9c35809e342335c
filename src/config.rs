use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::hamsat::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::state::store::default_state_path;

/// Central configuration loaded from environment variables.
///
/// The API key is a secret and only ever comes from the environment. The
/// .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// hams.at API key, sent as `Authorization: Bearer <key>`.
    pub api_key: String,
    /// Upcoming-alerts endpoint (defaults to https://hams.at/api/alerts/upcoming).
    pub api_url: String,
    /// When set, ignore the seen file and treat every current alert as new.
    /// The next save rebuilds the file from this run's alerts.
    pub reset_mode: bool,
    /// Where the seen-alert IDs are persisted.
    pub state_path: PathBuf,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything but the API key has a default. The key is checked
    /// separately by `require_api_key` so `status` works without one.
    pub fn load() -> Result<Self> {
        let timeout_secs = match env::var("HAMSALERT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HAMSALERT_TIMEOUT_SECS is not a number: {raw:?}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: env::var("HAMSAT_API_KEY").unwrap_or_default(),
            api_url: env::var("HAMSAT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            reset_mode: env::var("HAMSALERT_RESET_MODE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            state_path: env::var("HAMSALERT_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_path()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Check that the API key is configured.
    /// Call this before anything that talks to hams.at.
    pub fn require_api_key(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!(
                "HAMSAT_API_KEY not set. Add it to your .env file.\n\
                 Your key is on your hams.at account settings page."
            );
        }
        Ok(())
    }
}

/// Interpret an env var as a boolean switch.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
