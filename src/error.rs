use std::path::PathBuf;

/// Failure of a single source. Never leaves `Source::fetch`.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed JSON payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No endpoint configured")]
    NoEndpoints,
}

/// Whole-run failure, surfaced to the caller of the collector.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Cannot build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::error::Error),

    #[error("Spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedOutput(PathBuf),
}
