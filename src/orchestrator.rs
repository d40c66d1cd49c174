//! Resolution orchestrator: preferred source first, single-hop fallback.
//!
//! The two source queries within one resolution are sequential, not
//! parallel — the fallback decision depends on the first outcome, and
//! the secondary result would be wasted in the common case. An overall
//! wall-clock budget bounds the whole resolution; exceeding it surfaces
//! as `Unavailable` rather than hanging the caller.

use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::sources;
use crate::types::{Resolution, Source};
use std::time::Duration;

/// Resolve a query against the preferred source, falling back once.
///
/// The preferred source's `Detail` or `Suggestions` is returned
/// immediately; on `NotFound` or `Unavailable` the other source is
/// queried exactly once and its result returned verbatim, including a
/// possible `Unavailable`. At most two source queries per call.
///
/// # Errors
///
/// Returns [`ResolveError::Config`] for an invalid configuration or an
/// empty query. Transport failures are not errors — they arrive as
/// [`Resolution::Unavailable`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> memeseek::Result<()> {
/// let config = memeseek::ResolverConfig::default();
/// let outcome = memeseek::orchestrator::resolve(
///     "rickroll",
///     memeseek::Source::KnowYourMeme,
///     &config,
/// )
/// .await?;
/// match outcome {
///     memeseek::Resolution::Detail(detail) => println!("{}: {}", detail.title, detail.url),
///     other => println!("{}", other.kind()),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn resolve(
    query: &str,
    preferred: Source,
    config: &ResolverConfig,
) -> Result<Resolution> {
    config.validate()?;
    let query = query.trim();
    if query.is_empty() {
        return Err(ResolveError::Config("query must not be empty".into()));
    }

    let budget = Duration::from_secs(config.request_budget_seconds);
    match tokio::time::timeout(budget, resolve_with_fallback(query, preferred, config)).await {
        Ok(resolution) => Ok(resolution),
        Err(_) => {
            tracing::error!(
                query,
                budget_seconds = config.request_budget_seconds,
                "resolution budget exceeded"
            );
            Ok(Resolution::Unavailable {
                reason: format!(
                    "resolution exceeded the {}s budget",
                    config.request_budget_seconds
                ),
            })
        }
    }
}

/// Fetch a previously listed candidate's detail page under the same
/// wall-clock budget as a full resolution.
///
/// Used by the selection phase: the candidate's href is already known,
/// so the listing search is bypassed.
///
/// # Errors
///
/// Returns [`ResolveError::Config`] for an invalid configuration.
pub async fn resolve_selection(
    source: Source,
    href: &str,
    config: &ResolverConfig,
) -> Result<Resolution> {
    config.validate()?;

    let budget = Duration::from_secs(config.request_budget_seconds);
    match tokio::time::timeout(budget, sources::detail(source, href, config)).await {
        Ok(resolution) => Ok(resolution),
        Err(_) => {
            tracing::error!(
                %source,
                href,
                budget_seconds = config.request_budget_seconds,
                "selection fetch budget exceeded"
            );
            Ok(Resolution::Unavailable {
                reason: format!(
                    "resolution exceeded the {}s budget",
                    config.request_budget_seconds
                ),
            })
        }
    }
}

async fn resolve_with_fallback(
    query: &str,
    preferred: Source,
    config: &ResolverConfig,
) -> Resolution {
    let first = sources::search(preferred, query, config).await;
    match first {
        Resolution::Detail(_) | Resolution::Suggestions { .. } => first,
        Resolution::NotFound | Resolution::Unavailable { .. } => {
            let secondary = preferred.other();
            tracing::warn!(
                preferred = %preferred,
                fallback = %secondary,
                outcome = first.kind(),
                "preferred source yielded nothing, falling back"
            );
            sources::search(secondary, query, config).await
        }
    }
}
