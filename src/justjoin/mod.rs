mod offer;

pub use offer::format_salary;

use crate::{HttpClient, JobPosting, Settings, Source, SourceError};
use offer::{parse_offers, Payload};
use tracing::{debug, warn};

pub const NAME: &str = "JustJoin.it";

/// JSON offers API, with mirror endpoints tried in order.
#[derive(Debug, Clone)]
pub struct JustJoinSource {
    endpoints: Vec<String>,
}

impl JustJoinSource {
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JustJoinSource {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        JustJoinSource::new(settings.justjoin_endpoints.iter().cloned())
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    async fn fetch_payload(&self, http: &HttpClient, url: &str) -> Result<Payload, SourceError> {
        let body = http.get_text(url, &[]).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for JustJoinSource {
    fn default() -> Self {
        JustJoinSource::from_settings(&Settings::default())
    }
}

#[async_trait::async_trait]
impl Source for JustJoinSource {
    fn name(&self) -> &str {
        NAME
    }

    /// The first endpoint returning a valid payload wins; otherwise the last error is returned.
    async fn try_fetch(&self, http: &HttpClient) -> Result<Vec<JobPosting>, SourceError> {
        let mut last_error = SourceError::NoEndpoints;

        for url in &self.endpoints {
            match self.fetch_payload(http, url).await {
                Ok(payload) => {
                    debug!("[{}] Payload from {}", NAME, url);
                    return Ok(parse_offers(payload.into_offers()));
                }
                Err(e) => {
                    warn!("[{}] Endpoint {} failed: {}", NAME, url, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
