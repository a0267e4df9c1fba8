use analyst_job_collector::{
    export::{self, OutputFormat},
    Collector, CollectorError, FilterConfig, NoDelay, PostingArchive, Settings,
};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Collect data analyst job postings into a spreadsheet.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Country codes to keep (e.g. PL DE CH). All countries when omitted.
    #[arg(long, num_args = 0..)]
    countries: Vec<String>,

    /// Keywords excluded from job titles. Replaces the built-in list when given.
    #[arg(long, num_args = 0..)]
    exclude: Option<Vec<String>>,

    /// Exclude senior roles.
    #[arg(long)]
    exclude_senior: bool,

    /// Exclude intern roles.
    #[arg(long)]
    exclude_intern: bool,

    /// Output file, .xlsx or .csv.
    #[arg(long, default_value = "jobs_data.xlsx")]
    output: PathBuf,

    /// Also append the postings to this SQLite database.
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Search query sent to the HTML job board.
    #[arg(long)]
    query: Option<String>,

    /// Do not pause between requests.
    #[arg(long)]
    no_delay: bool,

    /// JSON file overriding endpoints, timeout and delays.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn filter(&self) -> FilterConfig {
        let builder = match &self.exclude {
            Some(keywords) => FilterConfig::builder().without_defaults().exclude(keywords),
            None => FilterConfig::builder(),
        };
        builder
            .exclude_senior(self.exclude_senior)
            .exclude_intern(self.exclude_intern)
            .countries(&self.countries)
            .build()
    }
}

async fn run(args: Args) -> Result<usize, CollectorError> {
    OutputFormat::from_path(&args.output)?;

    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(query) = &args.query {
        settings.query = query.clone();
    }

    let collector = if args.no_delay {
        Collector::from_settings(&settings, NoDelay)?
    } else {
        Collector::from_settings(&settings, settings.pacing())?
    };

    let filter = args.filter();
    info!(
        "Sources: {:?}, excluding {:?}, countries {:?}",
        collector.source_names(),
        filter.exclude_keywords(),
        filter.countries()
    );

    let collection = collector.collect(&filter).await;
    if collection.is_empty() {
        warn!("No jobs found with the selected filters");
    }

    export::write_table(&args.output, &collection.postings)?;

    if let Some(path) = &args.archive {
        let archive = PostingArchive::open(path).await?;
        let added = archive.archive(&collection.postings).await?;
        info!("Archived {} new postings in {}", added, path.display());
    }

    Ok(collection.len())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    let output = args.output.clone();

    match run(args).await {
        Ok(saved) => {
            println!("Saved {} jobs to {}", saved, output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Collection failed: {}", e);
            eprintln!("Collection failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
