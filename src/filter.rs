use crate::{utils::normalized_text, JobPosting};
use itertools::Itertools;

/// Title fragments that define the roles we collect.
pub const INCLUDE_KEYWORDS: [&str; 5] = [
    "data analyst",
    "data scientist",
    "business analyst",
    "bi developer",
    "analytics engineer",
];

pub const DEFAULT_EXCLUDE_KEYWORDS: [&str; 1] = ["manager"];

pub const SENIOR_KEYWORD: &str = "senior";
pub const INTERN_KEYWORD: &str = "intern";

/// True iff the normalized title holds an include keyword and no exclude keyword.
pub fn passes_keyword_filters<I, S>(title: &str, exclude_keywords: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = normalized_text(title);
    if !INCLUDE_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return false;
    }
    !exclude_keywords.into_iter().any(|k| {
        let k = normalized_text(k.as_ref());
        !k.is_empty() && normalized.contains(&k)
    })
}

/// An empty or missing allow-list means no restriction.
pub fn within_country_filter<S: AsRef<str>>(country: &str, allowed: Option<&[S]>) -> bool {
    match allowed {
        None => true,
        Some([]) => true,
        Some(codes) => codes
            .iter()
            .any(|code| code.as_ref().trim().eq_ignore_ascii_case(country.trim())),
    }
}

/// Final, immutable filter settings for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    exclude_keywords: Vec<String>,
    countries: Option<Vec<String>>,
}

impl FilterConfig {
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    /// Keeps every posting that matches an include keyword.
    pub fn unrestricted() -> Self {
        FilterConfig {
            exclude_keywords: vec![],
            countries: None,
        }
    }

    pub fn exclude_keywords(&self) -> &[String] {
        &self.exclude_keywords
    }

    pub fn countries(&self) -> Option<&[String]> {
        self.countries.as_deref()
    }

    pub fn matches(&self, posting: &JobPosting) -> bool {
        passes_keyword_filters(&posting.title, &self.exclude_keywords)
            && within_country_filter(&posting.country, self.countries())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::builder().build()
    }
}

/// Accumulates exclusion keywords and the country allow-list.
///
/// Starts from [`DEFAULT_EXCLUDE_KEYWORDS`] unless [`FilterBuilder::without_defaults`]
/// is called first.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    exclude_keywords: Vec<String>,
    countries: Option<Vec<String>>,
}

impl Default for FilterBuilder {
    fn default() -> Self {
        FilterBuilder {
            exclude_keywords: DEFAULT_EXCLUDE_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            countries: None,
        }
    }
}

impl FilterBuilder {
    pub fn without_defaults(mut self) -> Self {
        self.exclude_keywords.clear();
        self
    }

    pub fn exclude<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_keywords.extend(
            keywords
                .into_iter()
                .map(|k| normalized_text(k.as_ref()))
                .filter(|k| !k.is_empty()),
        );
        self
    }

    pub fn exclude_senior(self, yes: bool) -> Self {
        if yes {
            self.exclude([SENIOR_KEYWORD])
        } else {
            self
        }
    }

    pub fn exclude_intern(self, yes: bool) -> Self {
        if yes {
            self.exclude([INTERN_KEYWORD])
        } else {
            self
        }
    }

    /// Blank codes are dropped; an empty list leaves countries unrestricted.
    pub fn countries<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self.countries = if codes.is_empty() { None } else { Some(codes) };
        self
    }

    pub fn build(self) -> FilterConfig {
        FilterConfig {
            exclude_keywords: self.exclude_keywords.into_iter().unique().collect(),
            countries: self.countries,
        }
    }
}
