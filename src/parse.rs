//! HTML page parsing for listing and detail pages.
//!
//! Each source supplies a CSS schema ([`ListingSchema`] / [`DetailSchema`]);
//! the parse functions here are pure and separated from fetching for
//! testability with mock HTML. Missing detail nodes are recovered locally
//! with placeholder values, never propagated as hard failures.

use crate::error::{ResolveError, Result};
use crate::types::Candidate;
use scraper::{Html, Selector};

/// Placeholder title when a detail page carries no usable heading.
pub const FALLBACK_TITLE: &str = "Untitled";

/// Placeholder summary when a detail page carries no content block.
pub const FALLBACK_SUMMARY: &str = "Description unavailable.";

/// Marker appended to a summary that was cut at the configured length.
const TRUNCATION_MARKER: char = '…';

/// CSS schema for a source's search-results listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingSchema {
    /// Selector matching the result anchors (title text + href).
    pub result_selector: &'static str,
}

/// CSS schema for a source's detail page.
#[derive(Debug, Clone, Copy)]
pub struct DetailSchema {
    /// Selector for the main content block.
    pub content_selector: &'static str,
    /// Selector for the entry title.
    pub title_selector: &'static str,
}

/// Title and summary extracted from a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    /// Entry title, [`FALLBACK_TITLE`] when absent.
    pub title: String,
    /// Cleaned, possibly truncated summary text.
    pub summary: String,
}

/// Parse a search-results listing into candidates.
///
/// Collects up to `cap` anchors with a non-empty title and href, in
/// listing order. Anchor text includes nested link text, matching how
/// the sites nest markup inside result titles.
///
/// # Errors
///
/// Returns [`ResolveError::Parse`] only for an invalid selector in the
/// schema; a page without matching nodes yields an empty list.
pub fn parse_listing(html: &str, schema: &ListingSchema, cap: usize) -> Result<Vec<Candidate>> {
    let document = Html::parse_document(html);
    let result_sel = Selector::parse(schema.result_selector)
        .map_err(|e| ResolveError::Parse(format!("invalid listing selector: {e:?}")))?;

    let mut candidates = Vec::new();
    for element in document.select(&result_sel) {
        let title = element.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }
        let href = match element.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        candidates.push(Candidate {
            title,
            href: href.to_string(),
        });
        if candidates.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "listing parsed");
    Ok(candidates)
}

/// Parse a detail page into title and summary.
///
/// The title falls back to [`FALLBACK_TITLE`] and the summary to
/// [`FALLBACK_SUMMARY`] when the expected nodes are missing. Summary
/// text keeps the text of inline links, collapses whitespace, and is
/// truncated to `max_chars` characters with a marker when cut.
///
/// # Errors
///
/// Returns [`ResolveError::Parse`] only for an invalid selector in the
/// schema.
pub fn parse_detail(html: &str, schema: &DetailSchema, max_chars: usize) -> Result<DetailFields> {
    let document = Html::parse_document(html);
    let content_sel = Selector::parse(schema.content_selector)
        .map_err(|e| ResolveError::Parse(format!("invalid content selector: {e:?}")))?;
    let title_sel = Selector::parse(schema.title_selector)
        .map_err(|e| ResolveError::Parse(format!("invalid title selector: {e:?}")))?;

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let summary = match document.select(&content_sel).next() {
        Some(element) => {
            let text = normalise_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if text.is_empty() {
                FALLBACK_SUMMARY.to_string()
            } else {
                truncate_summary(&text, max_chars)
            }
        }
        None => FALLBACK_SUMMARY.to_string(),
    };

    Ok(DetailFields { title, summary })
}

/// Collapse runs of whitespace into single spaces and trim the ends.
fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to `max_chars` characters, appending a marker when cut.
fn truncate_summary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push(TRUNCATION_MARKER);
    truncated
}
