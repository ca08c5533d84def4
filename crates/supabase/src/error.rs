//! Error type for the hosted backend clients.

use std::sync::LazyLock;

use regex::Regex;

use arc_audio_core::StoreError;

/// Cooldown assumed when a 429 carries no "after N seconds" hint.
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

static RETRY_AFTER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?i)after\s+(\d+)\s*seconds?").unwrap()
});

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request. Carries the upstream message verbatim
    /// so the UI can show it.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Upstream error message.
        message: String,
    },

    /// Too many requests; the caller should cool down before retrying.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Response body parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl SupabaseError {
    /// Build the right variant for a non-success response.
    ///
    /// A 429 becomes [`Self::RateLimited`] with the cooldown parsed from the
    /// upstream "try again after N seconds" message, defaulting to 30.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 429 {
            return Self::RateLimited(parse_retry_after(&message));
        }
        Self::Api { status, message }
    }
}

/// Extract the cooldown seconds from a rate-limit message.
fn parse_retry_after(message: &str) -> u64 {
    RETRY_AFTER
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::RateLimited(secs) => Self::RateLimited(secs),
            SupabaseError::NotFound(what) => Self::NotFound(what),
            SupabaseError::Parse(e) => Self::Malformed(e.to_string()),
            other => Self::Remote(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_parsed_from_message() {
        let err = SupabaseError::from_status(
            429,
            "For security purposes, you can only request this after 17 seconds.".to_string(),
        );
        assert!(matches!(err, SupabaseError::RateLimited(17)));
    }

    #[test]
    fn test_retry_after_defaults_to_thirty() {
        let err = SupabaseError::from_status(429, "Too many requests".to_string());
        assert!(matches!(err, SupabaseError::RateLimited(30)));
    }

    #[test]
    fn test_non_429_keeps_upstream_message() {
        let err = SupabaseError::from_status(409, "duplicate key value".to_string());
        assert_eq!(err.to_string(), "duplicate key value");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: StoreError = SupabaseError::RateLimited(12).into();
        assert!(matches!(err, StoreError::RateLimited(12)));

        let err: StoreError =
            SupabaseError::from_status(500, "internal error".to_string()).into();
        assert!(matches!(err, StoreError::Remote(_)));
    }
}
