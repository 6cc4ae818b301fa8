//! Error types for DOI metadata retrieval.

use thiserror::Error;

/// Errors that can occur while resolving DOI metadata.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DoiError {
    /// Input is not a DOI.
    #[error("invalid DOI: {0}")]
    InvalidDoi(String),

    /// Neither registry knows the DOI.
    #[error("DOI not found: {0}")]
    NotFound(String),

    /// Request failed or the registry answered with an unexpected status.
    #[error("network error: {0}")]
    Network(String),

    /// Registry asked us to slow down.
    #[error("{registry} rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited {
        registry: &'static str,
        /// Seconds until the next request is allowed.
        retry_after: u64,
    },

    /// Response body does not have the expected shape.
    #[error("failed to decode {registry} record: {message}")]
    Decode {
        registry: &'static str,
        message: String,
    },
}

impl DoiError {
    pub(crate) fn decode(registry: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            registry,
            message: message.into(),
        }
    }

    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidDoi(_) => "That does not look like a DOI (expected 10.xxxx/...).",
            Self::NotFound(_) => "No Crossref or DataCite record exists for this DOI.",
            Self::Network(_) => {
                "Could not reach the DOI registries. Please check your internet connection."
            }
            Self::RateLimited { .. } => "DOI registry rate limit reached. Please try again later.",
            Self::Decode { .. } => "The DOI registry returned a record that could not be read.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for DoiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for DOI operations.
pub type Result<T> = std::result::Result<T, DoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = DoiError::Network("connection refused".to_string());
        assert!(err.user_message().contains("internet connection"));

        let err = DoiError::InvalidDoi("foo".to_string());
        assert!(err.user_message().contains("10.xxxx"));
    }

    #[test]
    fn test_retryable() {
        assert!(DoiError::Network("timeout".to_string()).is_retryable());
        assert!(
            DoiError::RateLimited {
                registry: "Crossref",
                retry_after: 60
            }
            .is_retryable()
        );
        assert!(!DoiError::NotFound("10.1/x".to_string()).is_retryable());
        assert!(!DoiError::decode("DataCite", "missing data").is_retryable());
    }
}
