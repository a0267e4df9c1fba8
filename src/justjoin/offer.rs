use crate::{safe_date, JobPosting, Remote};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::NAME;

/// The API has served both a bare list and a `{"data": [...]}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Payload {
    List(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl Payload {
    pub(crate) fn into_offers(self) -> Vec<Value> {
        match self {
            Payload::List(offers) => offers,
            Payload::Wrapped { data } => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Offer {
    title: Option<String>,
    company_name: Option<String>,
    city: Option<String>,
    country_code: Option<String>,
    remote: Value,
    skills: Option<Vec<Value>>,
    published_at: Option<String>,
    url: Option<String>,
    employment_types: Option<Vec<Value>>,
}

impl Offer {
    /// `None` when the offer has no title.
    pub(crate) fn into_posting(self) -> Option<JobPosting> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let tech_stack = self
            .skills
            .unwrap_or_default()
            .iter()
            .filter_map(skill_name)
            .join(", ");

        Some(JobPosting {
            source: NAME.to_string(),
            title,
            company: self.company_name.unwrap_or_default(),
            salary: format_salary(&self.employment_types.unwrap_or_default()),
            city: self.city.unwrap_or_default(),
            country: self.country_code.unwrap_or_default(),
            remote: Remote::from(is_truthy(&self.remote)),
            tech_stack,
            date_posted: safe_date(self.published_at.as_deref().unwrap_or_default()),
            link: self.url.unwrap_or_default(),
        })
    }
}

/// Maps every offer of a payload, skipping malformed or untitled ones.
pub(crate) fn parse_offers(offers: Vec<Value>) -> Vec<JobPosting> {
    offers
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Offer>(raw) {
            Ok(offer) => offer.into_posting(),
            Err(e) => {
                warn!("[{}] Skip malformed offer: {}", NAME, e);
                None
            }
        })
        .collect()
}

/// Renders every complete `from - to currency` salary, joined by `"; "`.
pub fn format_salary(employment_types: &[Value]) -> String {
    employment_types
        .iter()
        .filter_map(|employment| {
            let salary = employment.get("salary").filter(|s| is_truthy(s))?;
            let from = salary.get("from").filter(|v| is_truthy(v))?;
            let to = salary.get("to").filter(|v| is_truthy(v))?;
            let currency = salary.get("currency").filter(|v| is_truthy(v))?;
            Some(format!(
                "{} - {} {}",
                amount(from),
                amount(to),
                amount(currency)
            ))
        })
        .join("; ")
}

fn amount(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn skill_name(skill: &Value) -> Option<String> {
    match skill {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(o) => o
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
