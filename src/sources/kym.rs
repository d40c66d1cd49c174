//! Know Your Meme — broad, English-leaning knowledge source.
//!
//! Listing search at `/search?q=...`; result anchors sit inside an
//! `.entry_list` container and carry site-relative hrefs, so candidate
//! URLs are joined against the base URL before fetching.

use crate::config::ResolverConfig;
use crate::parse::{DetailSchema, ListingSchema};
use crate::sources::MemeSource;
use crate::types::Source;
use url::Url;

/// Know Your Meme source adapter.
pub struct KymSource;

impl MemeSource for KymSource {
    fn source(&self) -> Source {
        Source::KnowYourMeme
    }

    fn listing_url(&self, query: &str, config: &ResolverConfig) -> String {
        config.kym.search_url(query)
    }

    fn candidate_url(&self, href: &str, config: &ResolverConfig) -> String {
        match Url::parse(&config.kym.base_url).and_then(|base| base.join(href)) {
            Ok(joined) => joined.to_string(),
            Err(_) => format!("{}{}", config.kym.base_url.trim_end_matches('/'), href),
        }
    }

    fn listing_schema(&self) -> ListingSchema {
        ListingSchema {
            result_selector: ".entry_list a",
        }
    }

    fn detail_schema(&self) -> DetailSchema {
        DetailSchema {
            content_selector: ".bodycopy",
            title_selector: "h1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const MOCK_KYM_LISTING: &str = r#"<!DOCTYPE html>
<html>
<body>
<table class="entry_list">
    <tr><td><a href="/memes/rickroll">Rickroll</a></td></tr>
    <tr><td><a href="/memes/gangnam-style">Gangnam Style</a></td></tr>
    <tr><td><a href="/memes/doge">Doge</a></td></tr>
</table>
</body>
</html>"#;

    #[test]
    fn listing_url_uses_kym_template() {
        let config = ResolverConfig::default();
        assert_eq!(
            KymSource.listing_url("rickroll", &config),
            "https://knowyourmeme.com/search?q=rickroll"
        );
    }

    #[test]
    fn candidate_url_joins_relative_href() {
        let config = ResolverConfig::default();
        assert_eq!(
            KymSource.candidate_url("/memes/rickroll", &config),
            "https://knowyourmeme.com/memes/rickroll"
        );
    }

    #[test]
    fn candidate_url_passes_absolute_href_through() {
        let config = ResolverConfig::default();
        assert_eq!(
            KymSource.candidate_url("https://knowyourmeme.com/memes/doge", &config),
            "https://knowyourmeme.com/memes/doge"
        );
    }

    #[test]
    fn listing_schema_parses_mock_listing() {
        let candidates =
            parse::parse_listing(MOCK_KYM_LISTING, &KymSource.listing_schema(), 10).expect("parse");
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].title, "Rickroll");
        assert_eq!(candidates[0].href, "/memes/rickroll");
    }

    #[test]
    fn detail_schema_parses_bodycopy() {
        let html = r#"<html><body>
<h1>Rickroll</h1>
<section class="bodycopy"><p>A bait-and-switch prank.</p></section>
</body></html>"#;
        let fields =
            parse::parse_detail(html, &KymSource.detail_schema(), 500).expect("parse");
        assert_eq!(fields.title, "Rickroll");
        assert_eq!(fields.summary, "A bait-and-switch prank.");
    }
}
