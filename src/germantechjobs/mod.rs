mod listing;

pub use listing::parse_listing;

use crate::{HttpClient, JobPosting, Settings, Source, SourceError};

pub const NAME: &str = "GermanTechJobs.de";

/// The board only lists jobs in Germany.
pub const COUNTRY: &str = "DE";

/// HTML search page. Salary, remote, stack and date are never available.
#[derive(Debug, Clone)]
pub struct GermanTechJobsSource {
    url: String,
    host: String,
    query: String,
}

impl GermanTechJobsSource {
    pub fn new(url: impl Into<String>, host: impl Into<String>, query: impl Into<String>) -> Self {
        GermanTechJobsSource {
            url: url.into(),
            host: host.into(),
            query: query.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        GermanTechJobsSource::new(
            settings.germantechjobs_url.as_str(),
            settings.germantechjobs_host.as_str(),
            settings.query.as_str(),
        )
    }
}

impl Default for GermanTechJobsSource {
    fn default() -> Self {
        GermanTechJobsSource::from_settings(&Settings::default())
    }
}

#[async_trait::async_trait]
impl Source for GermanTechJobsSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn try_fetch(&self, http: &HttpClient) -> Result<Vec<JobPosting>, SourceError> {
        let html = http
            .get_text(&self.url, &[("search", self.query.as_str())])
            .await?;
        Ok(parse_listing(&html, &self.host))
    }
}
