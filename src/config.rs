//! Resolver configuration with sensible defaults.
//!
//! [`ResolverConfig`] controls source endpoints, timeouts, retry policy,
//! similarity thresholds, and presentation caps. Thresholds and caps are
//! configuration defaults, not constants — callers may override any of
//! them with field syntax.

use crate::error::ResolveError;
use crate::types::Source;

/// Endpoints for one knowledge source.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    /// Base URL, also used to resolve relative candidate hrefs.
    pub base_url: String,
    /// Listing search path containing a `{query}` placeholder.
    pub search_template: String,
}

impl SourceEndpoints {
    /// Builds the listing-search URL for a query.
    ///
    /// The query is trimmed and percent-encoded before interpolation.
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query.trim());
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.search_template.replace("{query}", &encoded)
        )
    }
}

/// Configuration for meme resolution.
///
/// Use [`Default::default()`] for the stock sources and tuning, or
/// construct with field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Know Your Meme endpoints.
    pub kym: SourceEndpoints,
    /// Memepedia endpoints.
    pub memepedia: SourceEndpoints,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Additional attempts after the first failed request.
    pub max_retries: u32,
    /// Fixed delay between retry attempts in milliseconds.
    pub retry_backoff_ms: u64,
    /// Overall wall-clock budget for one resolution, including the
    /// fallback hop. Exceeding it surfaces as `Unavailable`.
    pub request_budget_seconds: u64,
    /// Maximum summary length in characters before truncation.
    pub summary_max_chars: usize,
    /// Minimum similarity for a candidate to appear in suggestions.
    pub discovery_threshold: f64,
    /// Minimum similarity for a reply to select a stored candidate.
    pub selection_threshold: f64,
    /// Maximum number of suggestion titles shown to the user.
    pub suggestion_cap: usize,
    /// Maximum number of listing entries considered per search.
    pub listing_cap: usize,
    /// Idle lifetime of a per-user disambiguation session in seconds.
    /// Set to 0 to keep sessions until explicitly cleared.
    pub session_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            kym: SourceEndpoints {
                base_url: "https://knowyourmeme.com".into(),
                search_template: "/search?q={query}".into(),
            },
            memepedia: SourceEndpoints {
                base_url: "https://memepedia.ru".into(),
                search_template: "/?s={query}".into(),
            },
            timeout_seconds: 10,
            max_retries: 2,
            retry_backoff_ms: 1000,
            request_budget_seconds: 45,
            summary_max_chars: 500,
            discovery_threshold: 0.2,
            selection_threshold: 0.7,
            suggestion_cap: 5,
            listing_cap: 10,
            session_ttl_seconds: 1800,
            user_agent: None,
        }
    }
}

impl ResolverConfig {
    /// Returns the endpoints for the given source.
    pub fn endpoints(&self, source: Source) -> &SourceEndpoints {
        match source {
            Source::KnowYourMeme => &self.kym,
            Source::Memepedia => &self.memepedia,
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` and `request_budget_seconds` must be greater than 0
    /// - thresholds must lie in `[0.0, 1.0]`
    /// - `suggestion_cap`, `listing_cap`, and `summary_max_chars` must be greater than 0
    /// - both search templates must contain the `{query}` placeholder
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.timeout_seconds == 0 {
            return Err(ResolveError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_budget_seconds == 0 {
            return Err(ResolveError::Config(
                "request_budget_seconds must be greater than 0".into(),
            ));
        }
        for (name, value) in [
            ("discovery_threshold", self.discovery_threshold),
            ("selection_threshold", self.selection_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ResolveError::Config(format!(
                    "{name} must lie in [0.0, 1.0], got {value}"
                )));
            }
        }
        if self.suggestion_cap == 0 {
            return Err(ResolveError::Config(
                "suggestion_cap must be greater than 0".into(),
            ));
        }
        if self.listing_cap == 0 {
            return Err(ResolveError::Config(
                "listing_cap must be greater than 0".into(),
            ));
        }
        if self.summary_max_chars == 0 {
            return Err(ResolveError::Config(
                "summary_max_chars must be greater than 0".into(),
            ));
        }
        for (name, endpoints) in [("kym", &self.kym), ("memepedia", &self.memepedia)] {
            if !endpoints.search_template.contains("{query}") {
                return Err(ResolveError::Config(format!(
                    "{name} search_template must contain a {{query}} placeholder"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = ResolverConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_backoff_ms, 1000);
        assert_eq!(config.summary_max_chars, 500);
        assert!((config.discovery_threshold - 0.2).abs() < f64::EPSILON);
        assert!((config.selection_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.suggestion_cap, 5);
        assert_eq!(config.listing_cap, 10);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn search_url_interpolates_and_encodes() {
        let config = ResolverConfig::default();
        assert_eq!(
            config.kym.search_url("rickroll"),
            "https://knowyourmeme.com/search?q=rickroll"
        );
        assert_eq!(
            config.memepedia.search_url("gang bang tortaiga"),
            "https://memepedia.ru/?s=gang%20bang%20tortaiga"
        );
    }

    #[test]
    fn search_url_trims_surrounding_whitespace() {
        let config = ResolverConfig::default();
        assert_eq!(
            config.kym.search_url("  doge  "),
            "https://knowyourmeme.com/search?q=doge"
        );
    }

    #[test]
    fn endpoints_selects_by_source() {
        let config = ResolverConfig::default();
        assert_eq!(
            config.endpoints(Source::KnowYourMeme).base_url,
            "https://knowyourmeme.com"
        );
        assert_eq!(
            config.endpoints(Source::Memepedia).base_url,
            "https://memepedia.ru"
        );
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ResolverConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_budget_rejected() {
        let config = ResolverConfig {
            request_budget_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_budget_seconds"));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let config = ResolverConfig {
            selection_threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("selection_threshold"));
    }

    #[test]
    fn zero_caps_rejected() {
        let config = ResolverConfig {
            suggestion_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            listing_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn template_without_placeholder_rejected() {
        let config = ResolverConfig {
            memepedia: SourceEndpoints {
                base_url: "https://memepedia.ru".into(),
                search_template: "/?s=".into(),
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("memepedia"));
    }

    #[test]
    fn zero_retries_valid() {
        let config = ResolverConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
