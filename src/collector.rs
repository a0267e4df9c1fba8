use crate::{
    deduplicate,
    germantechjobs::GermanTechJobsSource,
    justjoin::JustJoinSource,
    pacing::Pacing,
    CollectorError, Diagnostic, FilterConfig, HttpClient, JobPosting, Settings, Source,
};
use futures::future::join_all;
use tracing::{info, instrument, warn};

/// Result of one run: filtered, deduplicated postings plus source failures.
#[derive(Debug, Default)]
pub struct Collection {
    pub postings: Vec<JobPosting>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Runs every registered source and merges their output.
///
/// Sources are merged in registration order whatever order they finish in,
/// so "first seen" during deduplication means "highest priority source".
#[derive(Debug)]
pub struct Collector {
    http: HttpClient,
    sources: Vec<Box<dyn Source>>,
}

impl Collector {
    /// A collector with no source registered.
    pub fn new(http: HttpClient) -> Self {
        Collector {
            http,
            sources: vec![],
        }
    }

    /// JustJoin.it first, then GermanTechJobs.de.
    pub fn from_settings<P: Pacing + 'static>(
        settings: &Settings,
        pacing: P,
    ) -> Result<Self, CollectorError> {
        let http = HttpClient::new(settings, pacing)?;
        Ok(Collector::new(http)
            .with_source(JustJoinSource::from_settings(settings))
            .with_source(GermanTechJobsSource::from_settings(settings)))
    }

    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    #[instrument(skip_all)]
    pub async fn collect(&self, filter: &FilterConfig) -> Collection {
        let reports = join_all(self.sources.iter().map(|s| s.fetch(&self.http))).await;

        let mut postings = vec![];
        let mut diagnostics = vec![];
        for report in reports {
            postings.extend(report.postings);
            diagnostics.extend(report.diagnostic);
        }

        let fetched = postings.len();
        let matching: Vec<JobPosting> = postings.into_iter().filter(|p| filter.matches(p)).collect();
        let filtered = matching.len();
        let postings = deduplicate(matching);

        info!(
            "Fetched {}, kept {} after filters, {} after deduplication",
            fetched,
            filtered,
            postings.len()
        );
        for d in &diagnostics {
            warn!("Incomplete collection: {}", d);
        }

        Collection {
            postings,
            diagnostics,
        }
    }
}
