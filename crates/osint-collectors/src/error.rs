use osint_core::Platform;
use thiserror::Error;

/// Failure taxonomy shared by every collector.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Missing or rejected credentials (HTTP 401/403, failed token exchange).
    #[error("{platform}: authentication failed: {message}")]
    Authentication { platform: Platform, message: String },

    #[error("{platform}: rate limited (retry after {retry_after_secs}s)")]
    RateLimited {
        platform: Platform,
        retry_after_secs: u64,
    },

    /// Transport failure or timeout from the underlying HTTP client.
    #[error("{platform}: network error: {source}")]
    Network {
        platform: Platform,
        #[source]
        source: reqwest::Error,
    },

    #[error("{platform}: malformed response: {message}")]
    Data { platform: Platform, message: String },

    #[error("{platform}: unexpected HTTP status {status}")]
    UnexpectedStatus { platform: Platform, status: u16 },

    #[error("invalid search: {0}")]
    InvalidSearch(String),
}

impl CollectError {
    pub(crate) fn network(platform: Platform, source: reqwest::Error) -> Self {
        CollectError::Network { platform, source }
    }

    pub(crate) fn data(platform: Platform, message: impl Into<String>) -> Self {
        CollectError::Data {
            platform,
            message: message.into(),
        }
    }

    /// Platform the error came from, when it is tied to one.
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        match self {
            CollectError::Authentication { platform, .. }
            | CollectError::RateLimited { platform, .. }
            | CollectError::Network { platform, .. }
            | CollectError::Data { platform, .. }
            | CollectError::UnexpectedStatus { platform, .. } => Some(*platform),
            CollectError::InvalidSearch(_) => None,
        }
    }
}

/// Reject empty keywords before any request goes out.
pub(crate) fn validate_keyword(keyword: &str) -> Result<&str, CollectError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(CollectError::InvalidSearch(
            "keyword must be non-empty".to_string(),
        ));
    }
    Ok(trimmed)
}
