//! Shared HTTP client and bounded-retry page fetching.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, and rotating User-Agent strings, plus [`fetch_html`]:
//! a retrying GET with a fixed backoff between attempts. Failures are
//! returned as [`FetchFailure`] values, never raised past this module.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use rand::seq::SliceRandom;
use std::fmt;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Why a fetch ultimately failed after all attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request exceeded the configured timeout.
    Timeout,
    /// The server answered with a status other than 200.
    HttpStatus,
    /// Connection-level error (DNS, refused, reset).
    Network,
}

/// Terminal fetch failure, produced only after retries are exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Classification of the last failed attempt.
    pub kind: FailureKind,
    /// Status code of the last response, when one was received.
    pub last_status: Option<u16>,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Timeout => f.write_str("request timed out"),
            FailureKind::HttpStatus => match self.last_status {
                Some(status) => write!(f, "unexpected HTTP status {status}"),
                None => f.write_str("unexpected HTTP status"),
            },
            FailureKind::Network => f.write_str("network error"),
        }
    }
}

/// Build a [`reqwest::Client`] configured for scraping the meme sites.
///
/// The client has:
/// - Cookie store enabled
/// - Timeout from config
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`ResolveError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ResolverConfig) -> Result<reqwest::Client, ResolveError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ResolveError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Fetch a page as text with bounded retries.
///
/// Performs up to `max_retries + 1` GET attempts. A non-200 status, a
/// timeout, and a connection error are all treated as retryable; a fixed
/// `retry_backoff_ms` sleep separates attempts. Each failed attempt is
/// logged at WARN, exhaustion at ERROR.
///
/// Worst-case latency is bounded by
/// `timeout * (max_retries + 1) + backoff * max_retries`.
///
/// # Errors
///
/// Returns the [`FetchFailure`] describing the last attempt once all
/// attempts are spent.
pub async fn fetch_html(
    client: &reqwest::Client,
    url: &str,
    config: &ResolverConfig,
) -> Result<String, FetchFailure> {
    let attempts = config.max_retries + 1;
    let mut last_failure = FetchFailure {
        kind: FailureKind::Network,
        last_status: None,
    };

    for attempt in 1..=attempts {
        match client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9,ru;q=0.8")
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                if status == 200 {
                    match response.text().await {
                        Ok(body) => {
                            tracing::trace!(url, bytes = body.len(), "page fetched");
                            return Ok(body);
                        }
                        Err(e) => {
                            last_failure = classify(&e);
                            tracing::warn!(
                                url,
                                attempt,
                                total = attempts,
                                error = %e,
                                "response body read failed"
                            );
                        }
                    }
                } else {
                    last_failure = FetchFailure {
                        kind: FailureKind::HttpStatus,
                        last_status: Some(status),
                    };
                    tracing::warn!(url, attempt, total = attempts, status, "unexpected HTTP status");
                }
            }
            Err(e) => {
                last_failure = classify(&e);
                tracing::warn!(url, attempt, total = attempts, error = %e, "request failed");
            }
        }

        if attempt < attempts {
            tokio::time::sleep(Duration::from_millis(config.retry_backoff_ms)).await;
        }
    }

    tracing::error!(url, attempts, failure = %last_failure, "fetch attempts exhausted");
    Err(last_failure)
}

/// Classify a reqwest error into a [`FetchFailure`].
fn classify(error: &reqwest::Error) -> FetchFailure {
    let kind = if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    FetchFailure {
        kind,
        last_status: error.status().map(|s| s.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        let config = ResolverConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = ResolverConfig {
            user_agent: Some("memeseek-tests/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn user_agents_list_not_empty() {
        assert!(!USER_AGENTS.is_empty());
        assert_eq!(USER_AGENTS.len(), 5);
    }

    #[test]
    fn failure_display_includes_status() {
        let failure = FetchFailure {
            kind: FailureKind::HttpStatus,
            last_status: Some(503),
        };
        assert_eq!(failure.to_string(), "unexpected HTTP status 503");
    }

    #[test]
    fn failure_display_timeout_and_network() {
        let timeout = FetchFailure {
            kind: FailureKind::Timeout,
            last_status: None,
        };
        assert_eq!(timeout.to_string(), "request timed out");

        let network = FetchFailure {
            kind: FailureKind::Network,
            last_status: None,
        };
        assert_eq!(network.to_string(), "network error");
    }
}
