//! Memepedia — Russian-leaning knowledge source.
//!
//! Listing search at `/?s=...`; result anchors sit inside `.entry-title`
//! headings and already carry absolute hrefs, so candidate URLs pass
//! through unchanged.

use crate::config::ResolverConfig;
use crate::parse::{DetailSchema, ListingSchema};
use crate::sources::MemeSource;
use crate::types::Source;

/// Memepedia source adapter.
pub struct MemepediaSource;

impl MemeSource for MemepediaSource {
    fn source(&self) -> Source {
        Source::Memepedia
    }

    fn listing_url(&self, query: &str, config: &ResolverConfig) -> String {
        config.memepedia.search_url(query)
    }

    fn candidate_url(&self, href: &str, _config: &ResolverConfig) -> String {
        href.to_string()
    }

    fn listing_schema(&self) -> ListingSchema {
        ListingSchema {
            result_selector: ".entry-title a",
        }
    }

    fn detail_schema(&self) -> DetailSchema {
        DetailSchema {
            content_selector: ".entry-content",
            title_selector: "h1",
        }
    }
}
