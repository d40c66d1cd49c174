//! Source connectivity probe.
//!
//! Checks each knowledge source's listing endpoint with a throwaway
//! query and reports status, latency, and payload size. Useful for a
//! bot's diagnostic command; rendering the reports is left to the
//! caller.

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::http;
use crate::types::Source;
use std::time::Instant;

/// Outcome of probing one source's listing endpoint.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Which source was probed.
    pub source: Source,
    /// The exact URL requested.
    pub url: String,
    /// Whether the endpoint answered with a 200 within the retry bound.
    pub ok: bool,
    /// Wall-clock time for the probe, including retries.
    pub latency_ms: u64,
    /// Response body size in bytes; 0 on failure.
    pub bytes: usize,
    /// Failure description when `ok` is false.
    pub error: Option<String>,
}

/// Probe both sources' listing endpoints sequentially.
///
/// Uses the configured retry policy, so a flaky endpoint gets the same
/// chances a real search would.
///
/// # Errors
///
/// Returns [`crate::error::ResolveError::Config`] for an invalid
/// configuration. Per-source failures are reported in the returned
/// list, not as errors.
pub async fn probe_sources(config: &ResolverConfig) -> Result<Vec<ProbeReport>> {
    config.validate()?;
    let client = http::build_client(config)?;

    let mut reports = Vec::with_capacity(Source::all().len());
    for &source in Source::all() {
        let url = config.endpoints(source).search_url("test");
        let started = Instant::now();
        let outcome = http::fetch_html(&client, &url, config).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let report = match outcome {
            Ok(body) => ProbeReport {
                source,
                url,
                ok: true,
                latency_ms,
                bytes: body.len(),
                error: None,
            },
            Err(failure) => ProbeReport {
                source,
                url,
                ok: false,
                latency_ms,
                bytes: 0,
                error: Some(failure.to_string()),
            },
        };
        tracing::debug!(source = %report.source, ok = report.ok, latency_ms = report.latency_ms, "source probed");
        reports.push(report);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_rejects_invalid_config() {
        let config = ResolverConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(probe_sources(&config).await.is_err());
    }
}
