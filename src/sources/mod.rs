//! Knowledge source implementations.
//!
//! Each source supplies its endpoints, CSS schemas, and href resolution
//! via [`MemeSource`]; the search-and-disambiguate flow itself lives
//! once in [`search_source`]. Source-specific differences are confined
//! to the base URL, the listing query template, the listing/detail
//! schemas, and whether candidate hrefs are absolute.

pub mod kym;
pub mod memepedia;

pub use kym::KymSource;
pub use memepedia::MemepediaSource;

use crate::config::ResolverConfig;
use crate::http;
use crate::matcher;
use crate::parse::{self, DetailSchema, ListingSchema};
use crate::types::{MemeDetail, Resolution, Source};

/// A pluggable meme knowledge source.
///
/// Implementors describe how to reach a specific site: where its listing
/// search lives, how candidate hrefs resolve to absolute URLs, and which
/// CSS schemas extract candidates and detail fields.
///
/// All implementations must be `Send + Sync` so resolutions for
/// different users can run concurrently.
pub trait MemeSource: Send + Sync {
    /// Returns which [`Source`] variant this implementation represents.
    fn source(&self) -> Source;

    /// Builds the listing-search URL for a query.
    fn listing_url(&self, query: &str, config: &ResolverConfig) -> String;

    /// Resolves a listing href to the absolute detail-page URL.
    fn candidate_url(&self, href: &str, config: &ResolverConfig) -> String;

    /// CSS schema for the search-results listing.
    fn listing_schema(&self) -> ListingSchema;

    /// CSS schema for a detail page.
    fn detail_schema(&self) -> DetailSchema;
}

/// Search one source for a query.
///
/// 1. Fetch the listing page — fetch failure is `Unavailable`.
/// 2. Parse candidates — an empty listing is `NotFound`.
/// 3. On an exact title match, fetch and parse that candidate's detail
///    page. The item is known to exist, so a failed detail fetch is
///    `Unavailable`, never `NotFound`.
/// 4. Otherwise rank near-matches against the discovery threshold:
///    non-empty is `Suggestions`, empty is `NotFound`.
pub(crate) async fn search_source<S: MemeSource>(
    src: &S,
    query: &str,
    config: &ResolverConfig,
) -> Resolution {
    tracing::trace!(source = %src.source(), query, "listing search");

    let client = match http::build_client(config) {
        Ok(client) => client,
        Err(e) => {
            return Resolution::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    let listing_url = src.listing_url(query, config);
    let html = match http::fetch_html(&client, &listing_url, config).await {
        Ok(html) => html,
        Err(failure) => {
            return Resolution::Unavailable {
                reason: format!("{}: {failure}", src.source()),
            }
        }
    };

    let candidates = match parse::parse_listing(&html, &src.listing_schema(), config.listing_cap) {
        Ok(candidates) => candidates,
        Err(e) => {
            return Resolution::Unavailable {
                reason: format!("{}: {e}", src.source()),
            }
        }
    };

    if candidates.is_empty() {
        return Resolution::NotFound;
    }

    if let Some(index) = matcher::find_exact(query, &candidates) {
        tracing::debug!(source = %src.source(), title = %candidates[index].title, "exact match");
        return fetch_detail(src, &candidates[index].href, &client, config).await;
    }

    let ranked = matcher::rank_suggestions(query, &candidates, config.discovery_threshold);
    if ranked.is_empty() {
        Resolution::NotFound
    } else {
        tracing::debug!(source = %src.source(), count = ranked.len(), "ranked suggestions");
        Resolution::Suggestions {
            source: src.source(),
            items: ranked,
        }
    }
}

/// Fetch and parse one candidate's detail page.
///
/// Returns `Detail` on success and `Unavailable` on fetch or schema
/// failure; missing page nodes are recovered inside the parser with
/// placeholder fields.
pub(crate) async fn fetch_detail<S: MemeSource>(
    src: &S,
    href: &str,
    client: &reqwest::Client,
    config: &ResolverConfig,
) -> Resolution {
    let url = src.candidate_url(href, config);
    let html = match http::fetch_html(client, &url, config).await {
        Ok(html) => html,
        Err(failure) => {
            return Resolution::Unavailable {
                reason: format!("{}: {failure}", src.source()),
            }
        }
    };

    let fields = match parse::parse_detail(&html, &src.detail_schema(), config.summary_max_chars) {
        Ok(fields) => fields,
        Err(e) => {
            return Resolution::Unavailable {
                reason: format!("{}: {e}", src.source()),
            }
        }
    };

    Resolution::Detail(MemeDetail {
        title: fields.title,
        summary: fields.summary,
        url,
        source: src.source(),
    })
}

/// Dispatch a listing search to the concrete source implementation.
pub async fn search(source: Source, query: &str, config: &ResolverConfig) -> Resolution {
    match source {
        Source::KnowYourMeme => search_source(&KymSource, query, config).await,
        Source::Memepedia => search_source(&MemepediaSource, query, config).await,
    }
}

/// Fetch a stored candidate's detail page directly, bypassing listing
/// search. Used by the selection phase of disambiguation.
pub async fn detail(source: Source, href: &str, config: &ResolverConfig) -> Resolution {
    let client = match http::build_client(config) {
        Ok(client) => client,
        Err(e) => {
            return Resolution::Unavailable {
                reason: e.to_string(),
            }
        }
    };
    match source {
        Source::KnowYourMeme => fetch_detail(&KymSource, href, &client, config).await,
        Source::Memepedia => fetch_detail(&MemepediaSource, href, &client, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KymSource>();
        assert_send_sync::<MemepediaSource>();
    }

    #[test]
    fn dispatch_covers_both_sources() {
        assert_eq!(KymSource.source(), Source::KnowYourMeme);
        assert_eq!(MemepediaSource.source(), Source::Memepedia);
    }
}
