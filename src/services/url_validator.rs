use url::Url;

use crate::errors::{AppError, AppResult};

/// MediaWiki namespaces that never hold article prose. A `/wiki/<ns>:...`
/// path is an administrative page, not quiz material.
const RESERVED_NAMESPACES: &[&str] = &[
    "special",
    "wikipedia",
    "file",
    "help",
    "category",
    "template",
    "portal",
    "talk",
    "user",
    "draft",
    "mediawiki",
];

/// Validates a raw string as a Wikipedia article URL and normalizes it.
///
/// Normalization strips the query and fragment and lower-cases scheme and
/// host; the path keeps its case because article titles are case-sensitive.
/// The returned string is the store's natural key.
pub fn validate_article_url(raw: &str) -> AppResult<String> {
    let mut url = Url::parse(raw.trim())
        .map_err(|_| AppError::InvalidUrl(format!("'{}' is not an absolute URL", raw)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::InvalidUrl(format!(
            "unsupported scheme '{}' in '{}'",
            url.scheme(),
            raw
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| AppError::InvalidUrl(format!("'{}' has no host", raw)))?;
    if host != "wikipedia.org" && !host.ends_with(".wikipedia.org") {
        return Err(AppError::InvalidUrl(format!(
            "'{}' is not a wikipedia.org URL",
            raw
        )));
    }

    let title = url
        .path()
        .strip_prefix("/wiki/")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::InvalidUrl(format!(
                "'{}' does not point at an article (expected /wiki/<title>)",
                raw
            ))
        })?;

    if title == "Main_Page" {
        return Err(AppError::InvalidUrl(format!(
            "'{}' is the main page, not an article",
            raw
        )));
    }

    if let Some((namespace, _)) = title.split_once(':') {
        if RESERVED_NAMESPACES.contains(&namespace.to_ascii_lowercase().as_str()) {
            return Err(AppError::InvalidUrl(format!(
                "'{}' is a {} page, not an article",
                raw, namespace
            )));
        }
    }

    // Url::parse already lower-cased scheme and host.
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}
