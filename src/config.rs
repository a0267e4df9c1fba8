use crate::{pacing::RandomDelay, CollectorError};
use serde::Deserialize;
use std::path::Path;
use tokio::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Source locations and transport knobs. Every field is optional in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tried in order until one returns a valid JSON payload.
    pub justjoin_endpoints: Vec<String>,
    pub germantechjobs_url: String,
    /// Prefix for relative links found on the listing page.
    pub germantechjobs_host: String,
    pub query: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            justjoin_endpoints: vec![
                "https://justjoin.it/api/offers".to_string(),
                "https://justjoin.it/api/offers?".to_string(),
                "https://justjoin.it/api/offers?language=en".to_string(),
            ],
            germantechjobs_url: "https://germantechjobs.de/jobs".to_string(),
            germantechjobs_host: "https://germantechjobs.de".to_string(),
            query: "Data Analyst".to_string(),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings, CollectorError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacing(&self) -> RandomDelay {
        RandomDelay::new(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}
