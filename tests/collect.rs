mod common;

use analyst_job_collector::{
    germantechjobs::GermanTechJobsSource, justjoin::JustJoinSource, Collector, FilterConfig,
    HttpClient, JobPosting, NoDelay, Settings, Source, SourceError,
};
use common::{closed_url, fixture, StubServer};
use pretty_assertions::assert_eq;
use std::time::Duration;

const EMPTY_LISTING: &str = "<html><body><main><p>Keine Treffer</p></main></body></html>";

fn settings(server: &StubServer, endpoints: Vec<String>) -> Settings {
    Settings {
        justjoin_endpoints: endpoints,
        germantechjobs_url: server.url("/jobs"),
        germantechjobs_host: server.base.clone(),
        timeout_secs: 5,
        ..Default::default()
    }
}

fn titles(postings: &[JobPosting]) -> Vec<&str> {
    postings.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn untitled_offer_is_dropped_by_the_source() {
    let server = StubServer::start(vec![
        ("/api/offers", 200, fixture("tests/json/justjoin.json")),
        ("/jobs", 200, EMPTY_LISTING.to_string()),
    ])
    .await;
    let settings = settings(&server, vec![server.url("/api/offers")]);
    let http = HttpClient::new(&settings, NoDelay).expect("Client");

    let fetched = JustJoinSource::from_settings(&settings)
        .try_fetch(&http)
        .await
        .expect("Fetch failed");
    assert_eq!(fetched.len(), 3);
    assert!(fetched.iter().all(|p| !p.title.is_empty()));

    let collector = Collector::from_settings(&settings, NoDelay).expect("Collector");
    let collection = collector.collect(&FilterConfig::unrestricted()).await;

    assert_eq!(
        titles(&collection.postings),
        ["Data Analyst", "Business Analyst", "Senior Data Scientist"]
    );
    assert!(collection.diagnostics.is_empty());
}

#[tokio::test]
async fn failing_api_keeps_html_postings() {
    let server = StubServer::start(vec![
        ("/broken", 500, "internal error".to_string()),
        ("/garbage", 200, "<html>not json</html>".to_string()),
        ("/jobs", 200, fixture("tests/htmls/germantechjobs.html")),
    ])
    .await;
    let endpoints = vec![
        server.url("/broken"),
        server.url("/garbage"),
        closed_url().await,
    ];
    let collector =
        Collector::from_settings(&settings(&server, endpoints), NoDelay).expect("Collector");

    let collection = collector.collect(&FilterConfig::unrestricted()).await;

    assert_eq!(
        titles(&collection.postings),
        ["Data Analyst (m/w/d)", "BI Developer", "Analytics Engineer"]
    );
    assert!(collection
        .postings
        .iter()
        .all(|p| p.source == "GermanTechJobs.de" && p.country == "DE"));

    assert_eq!(collection.diagnostics.len(), 1);
    assert_eq!(collection.diagnostics[0].source, "JustJoin.it");

    let hits = server.hits();
    assert_eq!(hits.iter().filter(|h| *h == "/broken").count(), 1);
    assert_eq!(hits.iter().filter(|h| *h == "/garbage").count(), 1);
}

#[tokio::test]
async fn first_working_endpoint_short_circuits() {
    let server = StubServer::start(vec![
        ("/broken", 503, "unavailable".to_string()),
        ("/mirror", 200, fixture("tests/json/justjoin.json")),
        ("/never", 200, "[]".to_string()),
    ])
    .await;
    let settings = settings(
        &server,
        vec![server.url("/broken"), server.url("/mirror"), server.url("/never")],
    );
    let http = HttpClient::new(&settings, NoDelay).expect("Client");

    let postings = JustJoinSource::from_settings(&settings)
        .try_fetch(&http)
        .await
        .expect("Fetch failed");

    assert_eq!(postings.len(), 3);
    assert_eq!(server.hits(), ["/broken", "/mirror"]);
}

#[tokio::test]
async fn every_endpoint_failing_reports_last_error() {
    let server = StubServer::start(vec![("/garbage", 200, "{".to_string())]).await;
    let settings = settings(&server, vec![closed_url().await, server.url("/garbage")]);
    let http = HttpClient::new(&settings, NoDelay).expect("Client");

    let result = JustJoinSource::from_settings(&settings).try_fetch(&http).await;
    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn html_source_sends_search_query() {
    let server = StubServer::start(vec![(
        "/jobs",
        200,
        fixture("tests/htmls/germantechjobs_anchors.html"),
    )])
    .await;
    let mut settings = settings(&server, vec![]);
    settings.query = "BI Developer".to_string();
    let http = HttpClient::new(&settings, NoDelay).expect("Client");

    let postings = GermanTechJobsSource::from_settings(&settings)
        .try_fetch(&http)
        .await
        .expect("Fetch failed");

    assert_eq!(titles(&postings), ["Data Scientist", "Business Analyst"]);
    assert_eq!(
        postings[0].link,
        format!("{}/jobs/SAP-Data-Scientist", server.base)
    );
    assert_eq!(server.hits(), ["/jobs?search=BI+Developer"]);
}

#[tokio::test]
async fn html_transport_error_is_a_diagnostic() {
    let server = StubServer::start(vec![("/jobs", 404, "gone".to_string())]).await;
    let settings = settings(&server, vec![]);
    let http = HttpClient::new(&settings, NoDelay).expect("Client");

    let report = GermanTechJobsSource::from_settings(&settings)
        .fetch(&http)
        .await;

    assert!(report.postings.is_empty());
    assert_eq!(report.source, "GermanTechJobs.de");
    assert!(report.diagnostic.is_some());
}

struct StaticSource {
    name: &'static str,
    delay: Duration,
    postings: Vec<JobPosting>,
}

#[async_trait::async_trait]
impl Source for StaticSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn try_fetch(&self, _http: &HttpClient) -> Result<Vec<JobPosting>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.postings.clone())
    }
}

struct FailingSource;

#[async_trait::async_trait]
impl Source for FailingSource {
    fn name(&self) -> &str {
        "Broken"
    }

    async fn try_fetch(&self, _http: &HttpClient) -> Result<Vec<JobPosting>, SourceError> {
        Err(SourceError::NoEndpoints)
    }
}

fn posting(source: &str, company: &str, title: &str, country: &str) -> JobPosting {
    JobPosting {
        source: source.to_string(),
        company: company.to_string(),
        title: title.to_string(),
        country: country.to_string(),
        ..Default::default()
    }
}

fn offline_collector() -> Collector {
    Collector::new(HttpClient::new(&Settings::default(), NoDelay).expect("Client"))
}

#[tokio::test]
async fn merge_order_follows_priority_not_completion() {
    let slow = StaticSource {
        name: "slow",
        delay: Duration::from_millis(100),
        postings: vec![posting("slow", "Acme", "Data Analyst", "PL")],
    };
    let fast = StaticSource {
        name: "fast",
        delay: Duration::ZERO,
        postings: vec![
            posting("fast", "ACME", "data  analyst", "PL"),
            posting("fast", "Globex", "Data Scientist", "DE"),
        ],
    };
    let collector = offline_collector().with_source(slow).with_source(fast);
    assert_eq!(collector.source_names(), ["slow", "fast"]);

    let collection = collector.collect(&FilterConfig::unrestricted()).await;

    assert_eq!(
        collection.postings,
        vec![
            posting("slow", "Acme", "Data Analyst", "PL"),
            posting("fast", "Globex", "Data Scientist", "DE"),
        ]
    );
}

#[tokio::test]
async fn filters_run_once_over_merged_postings() {
    let first = StaticSource {
        name: "first",
        delay: Duration::ZERO,
        postings: vec![
            posting("first", "Acme", "Senior Data Analyst", "PL"),
            posting("first", "Acme", "Engineering Manager", "PL"),
            posting("first", "Initech", "BI Developer", "fr"),
        ],
    };
    let second = StaticSource {
        name: "second",
        delay: Duration::ZERO,
        postings: vec![
            posting("second", "Globex", "Data Analyst Intern", "de"),
            posting("second", "Globex", "Analytics Engineer", "DE"),
            posting("second", "Globex", "analytics   engineer", "DE"),
        ],
    };
    let collector = offline_collector()
        .with_source(first)
        .with_source(FailingSource)
        .with_source(second);

    let filter = FilterConfig::builder()
        .exclude_intern(true)
        .countries(["PL", "DE"])
        .build();
    let collection = collector.collect(&filter).await;

    assert_eq!(
        titles(&collection.postings),
        ["Senior Data Analyst", "Analytics Engineer"]
    );
    assert_eq!(collection.diagnostics.len(), 1);
    assert_eq!(collection.diagnostics[0].source, "Broken");
    assert_eq!(
        collection.diagnostics[0].to_string(),
        "[Broken] No endpoint configured"
    );
}

#[tokio::test]
async fn no_sources_collect_nothing() {
    let collection = offline_collector().collect(&FilterConfig::default()).await;
    assert!(collection.is_empty());
    assert!(collection.diagnostics.is_empty());
}
