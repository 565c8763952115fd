use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::constants::{
    MAX_ENTITIES_PER_KIND, MAX_ENTITY_LINKS, MAX_SECTIONS, MIN_CONTENT_CHARS, MIN_PARAGRAPH_CHARS,
    SUBSTANTIAL_PARAGRAPH_CHARS, SUMMARY_MAX_CHARS,
};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{ArticleDigest, KeyEntities};

/// Mimics a browser; Wikipedia throttles requests with no User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Retrieves raw HTML for a page. Network errors, timeouts and non-2xx
/// statuses all surface as `AppError::Fetch`; retry policy lives with the
/// orchestrator, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Fetch(format!("request to '{}' timed out", url))
            } else {
                AppError::Fetch(format!("request to '{}' failed: {}", url, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "'{}' returned HTTP {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("failed to read body of '{}': {}", url, e)))
    }
}

static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("citation pattern is a valid regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1.firstHeading, h1#firstHeading").expect("valid title selector")
});
static PAGE_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid selector"));
static CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#mw-content-text, div.mw-parser-output, div#bodyContent")
        .expect("valid content selector")
});
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid selector"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3").expect("valid selector"));
static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.mw-headline").expect("valid selector"));
static WIKI_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='/wiki/']").expect("valid link selector"));

/// Section headings that carry no quiz-worthy content.
const BOILERPLATE_SECTIONS: &[&str] = &[
    "Contents",
    "References",
    "External links",
    "See also",
    "Notes",
    "Bibliography",
    "Further reading",
    "Footnotes",
    "Citations",
    "Sources",
];

const ORGANIZATION_MARKERS: &[&str] = &[
    "University",
    "Institute",
    "Company",
    "Organization",
    "Corporation",
    "Association",
];

const LOCATION_MARKERS: &[&str] = &["United States", "Kingdom", "City", "Country", "State"];

/// Turns raw article HTML into a normalized digest.
///
/// Pure: no network, no side effects, deterministic for identical input, so
/// the whole extraction heuristic can be exercised with fixture HTML.
pub fn extract_digest(html: &str) -> AppResult<ArticleDigest> {
    let document = Html::parse_document(html);

    let content = document
        .select(&CONTENT_SELECTOR)
        .next()
        .ok_or_else(|| AppError::EmptyContent("no main content region found".to_string()))?;

    let paragraphs = collect_paragraphs(&content);
    let body_len: usize = paragraphs.iter().map(|p| p.len()).sum();
    if body_len < MIN_CONTENT_CHARS {
        return Err(AppError::EmptyContent(format!(
            "extracted only {} characters of body text (minimum {})",
            body_len, MIN_CONTENT_CHARS
        )));
    }

    Ok(ArticleDigest {
        title: extract_title(&document),
        summary: extract_summary(&paragraphs),
        sections: extract_sections(&document),
        entities: extract_entities(&content),
    })
}

fn clean_text(raw: &str) -> String {
    let without_citations = CITATION_RE.replace_all(raw, "");
    WHITESPACE_RE
        .replace_all(&without_citations, " ")
        .trim()
        .to_string()
}

fn collect_paragraphs(content: &ElementRef) -> Vec<String> {
    content
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| clean_text(&p.text().collect::<String>()))
        .filter(|text| text.len() >= MIN_PARAGRAPH_CHARS && !text.starts_with("Coordinates:"))
        .collect()
}

fn extract_title(document: &Html) -> String {
    if let Some(heading) = document.select(&TITLE_SELECTOR).next() {
        let title = clean_text(&heading.text().collect::<String>());
        if !title.is_empty() {
            return title;
        }
    }

    document
        .select(&PAGE_TITLE_SELECTOR)
        .next()
        .map(|t| {
            clean_text(&t.text().collect::<String>())
                .trim_end_matches(" - Wikipedia")
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown Title".to_string())
}

fn extract_summary(paragraphs: &[String]) -> String {
    let lead = paragraphs
        .iter()
        .find(|p| p.len() > SUBSTANTIAL_PARAGRAPH_CHARS)
        .or_else(|| paragraphs.first());

    match lead {
        Some(text) => text.chars().take(SUMMARY_MAX_CHARS).collect(),
        None => String::new(),
    }
}

fn extract_sections(document: &Html) -> Vec<String> {
    let mut sections = Vec::new();

    for heading in document.select(&HEADING_SELECTOR) {
        let text = match heading.select(&HEADLINE_SELECTOR).next() {
            Some(headline) => clean_text(&headline.text().collect::<String>()),
            None => clean_text(&heading.text().collect::<String>()),
        };
        let text = text.trim_end_matches("[edit]").trim().to_string();

        if text.is_empty() || BOILERPLATE_SECTIONS.contains(&text.as_str()) {
            continue;
        }

        sections.push(text);
        if sections.len() >= MAX_SECTIONS {
            break;
        }
    }

    sections
}

/// Lightweight entity heuristics over the article's internal links, the way
/// the linked titles are capitalized and worded decides the bucket.
fn extract_entities(content: &ElementRef) -> KeyEntities {
    let mut entities = KeyEntities::default();
    let mut seen: HashSet<String> = HashSet::new();

    for link in content.select(&WIKI_LINK_SELECTOR).take(MAX_ENTITY_LINKS) {
        let text = clean_text(&link.text().collect::<String>());
        let href = link.value().attr("href").unwrap_or_default();

        if text.len() < 3 || text.len() > 50 || text.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        // Namespace links (File:, Category:, ...) are chrome, not entities.
        if href.trim_start_matches("/wiki/").contains(':') {
            continue;
        }
        if !seen.insert(text.clone()) {
            continue;
        }

        if ORGANIZATION_MARKERS.iter().any(|m| text.contains(m)) {
            if entities.organizations.len() < MAX_ENTITIES_PER_KIND {
                entities.organizations.insert(text);
            }
        } else if LOCATION_MARKERS.iter().any(|m| text.contains(m)) {
            if entities.locations.len() < MAX_ENTITIES_PER_KIND {
                entities.locations.insert(text);
            }
        } else if looks_like_person_name(&text) && entities.people.len() < MAX_ENTITIES_PER_KIND {
            entities.people.insert(text);
        }
    }

    entities
}

fn looks_like_person_name(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
}
