use crate::JobPosting;
use lazy_regex::regex;
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{COUNTRY, NAME};

const E: &str = "Invalid selector";
lazy_static! {
    static ref CARDS: Selector =
        Selector::parse("article, div.job-card, div.job-listing").expect(E);
    static ref JOB_ANCHORS: Selector = Selector::parse("a[href*='/jobs/']").expect(E);
    static ref TITLE: [Selector; 3] = [
        Selector::parse("h2").expect(E),
        Selector::parse("h3").expect(E),
        Selector::parse(".job-title").expect(E),
    ];
    static ref COMPANY: [Selector; 3] = [
        Selector::parse(".company").expect(E),
        Selector::parse(".company-name").expect(E),
        Selector::parse(".job-company").expect(E),
    ];
    static ref LOCATION: [Selector; 3] = [
        Selector::parse(".location").expect(E),
        Selector::parse(".job-location").expect(E),
        Selector::parse(".locations").expect(E),
    ];
    static ref LINK: Selector = Selector::parse("a[href]").expect(E);
}

/// Card selectors, tried in order. A later one is used only when every
/// earlier one matched nothing.
fn cards(doc: &Html) -> Vec<ElementRef<'_>> {
    [&*CARDS, &*JOB_ANCHORS]
        .into_iter()
        .map(|selector| doc.select(selector).collect::<Vec<_>>())
        .find(|cards| !cards.is_empty())
        .unwrap_or_default()
}

fn text_of(el: ElementRef<'_>) -> String {
    let text = el.text().collect::<String>();
    regex!(r"\s+").replace_all(&text, " ").trim().to_string()
}

/// Text of the first selector that matches anything inside `card`.
fn first_text(card: ElementRef<'_>, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .find_map(|selector| card.select(selector).next())
        .map(text_of)
        .unwrap_or_default()
}

fn link_of(card: ElementRef<'_>, host: &str) -> String {
    let href = if card.value().name() == "a" {
        card.value().attr("href")
    } else {
        card.select(&LINK).next().and_then(|a| a.value().attr("href"))
    };

    let href = match href.map(str::trim) {
        Some(href) if !href.is_empty() => href,
        _ => return String::new(),
    };

    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    match Url::parse(host).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("[{}] Keep unresolvable link {}: {}", NAME, href, e);
            href.to_string()
        }
    }
}

/// Extracts postings from a search result page. Cards without a title are dropped.
pub fn parse_listing(html: &str, host: &str) -> Vec<JobPosting> {
    let doc = Html::parse_document(html);
    let cards = cards(&doc);
    if cards.is_empty() {
        warn!("[{}] No job cards found", NAME);
    }

    cards
        .into_iter()
        .filter_map(|card| {
            let title = first_text(card, &*TITLE);
            if title.is_empty() {
                return None;
            }

            Some(JobPosting {
                source: NAME.to_string(),
                title,
                company: first_text(card, &*COMPANY),
                city: first_text(card, &*LOCATION),
                country: COUNTRY.to_string(),
                link: link_of(card, host),
                ..Default::default()
            })
        })
        .collect()
}
