use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use sqlx::SqlitePool;

/// Formats tried in order after RFC 3339 and RFC 2822 fail.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

// Month-first before day-first, so "05/01/2024" is May 1st and
// "25/01/2024" still parses as January 25th.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// Lowercase and collapse every whitespace run into one space.
pub fn normalized_text(text: &str) -> String {
    text.to_lowercase().split_whitespace().join(" ")
}

/// Best-effort conversion of a source date into `YYYY-MM-DD`.
///
/// The calendar date is taken in the offset the value was written in.
/// Returns an empty string for empty or unparseable input.
pub fn safe_date(value: &str) -> String {
    parse_date(value.trim())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date_naive())
        .or_else(|| {
            NAIVE_DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

pub(crate) async fn is_table_exists(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<bool, sqlx::Error> {
    Ok(
        sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?
            .is_some(),
    )
}

pub(crate) fn get_now() -> DateTime<FixedOffset> {
    let now = Local::now();
    now.with_timezone(now.offset())
}
