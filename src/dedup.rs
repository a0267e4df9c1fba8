use crate::{utils::normalized_text, JobPosting};
use std::collections::HashSet;

/// Identity of a posting across sources.
pub fn dedup_key(posting: &JobPosting) -> (String, String) {
    (
        normalized_text(&posting.company),
        normalized_text(&posting.title),
    )
}

/// Drops every posting whose (company, title) key was already seen.
///
/// The first occurrence wins even when a later duplicate carries more data.
pub fn deduplicate(postings: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::with_capacity(postings.len());
    postings
        .into_iter()
        .filter(|p| seen.insert(dedup_key(p)))
        .collect()
}
