//! # memeseek
//!
//! Meme lookup and disambiguation engine.
//!
//! This crate resolves a free-text query against two meme knowledge
//! sources — Know Your Meme (broad, English-leaning) and Memepedia
//! (Russian-leaning) — by scraping their search listings directly, and
//! returns either a single resolved entry or a ranked disambiguation
//! list. A per-user session layer turns an ambiguous query into a final
//! answer over one or more follow-up turns.
//!
//! ## Design
//!
//! - Listing pages are fetched with bounded retries and parsed with CSS
//!   selectors; an exact title match resolves straight to the detail page
//! - Near-matches are ranked by a case-folded character-diff ratio and
//!   filtered against a configurable threshold
//! - The preferred source is tried first; on nothing found or source
//!   unavailable, the other source is queried exactly once
//! - [`SessionController`] holds per-user disambiguation state in a
//!   bounded TTL cache and serialises each user's turns in receipt order
//!
//! ## Concurrency
//!
//! Resolution is plain `async` with no global state: wrap a
//! [`SessionController`] in an `Arc` and spawn one task per inbound
//! event. Within one resolution the two source queries are sequential —
//! the fallback decision needs the first outcome — and an overall
//! wall-clock budget surfaces overruns as [`Resolution::Unavailable`].

pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod matcher;
pub mod orchestrator;
pub mod parse;
pub mod probe;
pub mod session;
pub mod sources;
pub mod types;

pub use config::{ResolverConfig, SourceEndpoints};
pub use controller::{Event, Reply, SessionController};
pub use error::{ResolveError, Result};
pub use session::{Session, SessionStore};
pub use types::{Candidate, MemeDetail, Resolution, ScoredCandidate, Source};

/// Resolve a query against the preferred source, falling back once to
/// the other source.
///
/// # Errors
///
/// Returns [`ResolveError::Config`] for an invalid configuration or an
/// empty query; transport failures arrive as
/// [`Resolution::Unavailable`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> memeseek::Result<()> {
/// let config = memeseek::ResolverConfig::default();
/// let outcome = memeseek::resolve("rickroll", memeseek::Source::KnowYourMeme, &config).await?;
/// if let memeseek::Resolution::Detail(detail) = outcome {
///     println!("{}\n{}\n{}", detail.title, detail.summary, detail.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn resolve(
    query: &str,
    preferred: Source,
    config: &ResolverConfig,
) -> Result<Resolution> {
    orchestrator::resolve(query, preferred, config).await
}

/// Resolve with the stock configuration.
///
/// Convenience wrapper around [`resolve`] using
/// [`ResolverConfig::default()`].
///
/// # Errors
///
/// Same as [`resolve`].
pub async fn resolve_default(query: &str, preferred: Source) -> Result<Resolution> {
    resolve(query, preferred, &ResolverConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_validates_config() {
        let config = ResolverConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = resolve("doge", Source::KnowYourMeme, &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout_seconds"));
    }

    #[tokio::test]
    async fn resolve_rejects_empty_query() {
        let result = resolve("", Source::Memepedia, &ResolverConfig::default()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("query"));
    }
}
