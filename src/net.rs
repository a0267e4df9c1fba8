use crate::{
    config::Settings,
    pacing::{Pacing, Throttle},
    CollectorError, SourceError,
};
use tracing::debug;

/// Shared HTTP client. Every request goes through the same throttle.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    throttle: Throttle,
}

impl HttpClient {
    pub fn new<P: Pacing + 'static>(settings: &Settings, pacing: P) -> Result<Self, CollectorError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()
            .map_err(CollectorError::HttpClient)?;

        Ok(HttpClient {
            client,
            throttle: Throttle::new(pacing),
        })
    }

    /// GET `url` and return the body; non-2xx statuses are errors.
    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        self.throttle.wait().await;

        debug!("Visit {} {:?}", url, query);
        let mut request = self.client.get(url);
        // `query` with no pairs would strip a bare trailing '?' from the URL.
        if !query.is_empty() {
            request = request.query(query);
        }
        let text = request
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}
