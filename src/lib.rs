use std::fmt;
use tracing::{error, info};

pub mod collector;
pub mod config;
pub mod data;
pub mod dedup;
pub mod export;
pub mod filter;
pub mod germantechjobs;
pub mod justjoin;
pub mod net;
pub mod pacing;
pub mod posting;

mod error;
mod utils;

pub use collector::{Collection, Collector};
pub use config::Settings;
pub use data::{PostingArchive, Table};
pub use dedup::deduplicate;
pub use error::{CollectorError, SourceError};
pub use filter::{passes_keyword_filters, within_country_filter, FilterBuilder, FilterConfig};
pub use net::HttpClient;
pub use pacing::{NoDelay, Pacing, RandomDelay};
pub use posting::{JobPosting, Remote, COLUMNS};
pub use utils::{normalized_text, safe_date};

/// A failure reported by one source, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: String,
    pub reason: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.reason)
    }
}

/// What one source produced during a run.
#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub postings: Vec<JobPosting>,
    pub diagnostic: Option<Diagnostic>,
}

/// A job board turned into canonical postings.
///
/// Implementors only write `try_fetch`; callers only use `fetch`, which
/// never fails and degrades to an empty result plus a diagnostic.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    async fn try_fetch(&self, http: &HttpClient) -> Result<Vec<JobPosting>, SourceError>;

    async fn fetch(&self, http: &HttpClient) -> SourceReport {
        let source = self.name().to_string();
        match self.try_fetch(http).await {
            Ok(postings) => {
                info!("[{}] Fetched {} postings", source, postings.len());
                SourceReport {
                    source,
                    postings,
                    diagnostic: None,
                }
            }
            Err(e) => {
                error!(source = %source, "Failed to fetch: {}", e);
                let diagnostic = Diagnostic {
                    source: source.clone(),
                    reason: e.to_string(),
                };
                SourceReport {
                    source,
                    postings: vec![],
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }
}

impl fmt::Debug for dyn Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source({})", self.name())
    }
}
