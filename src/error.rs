//! Error types for the memeseek crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Transport failures travel as data
//! ([`crate::types::Resolution::Unavailable`]) rather than as errors;
//! this enum covers caller mistakes and malformed documents.

/// Errors that can occur while resolving a meme query.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// An HTTP client could not be constructed or a request failed
    /// in a way that is not expressed as an unavailable source.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A source page could not be parsed with the configured schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid resolver configuration or query.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for memeseek results.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = ResolveError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = ResolveError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_config() {
        let err = ResolveError::Config("timeout_seconds must be > 0".into());
        assert_eq!(err.to_string(), "config error: timeout_seconds must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolveError>();
    }
}
