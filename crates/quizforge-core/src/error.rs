//! Error types.
//!
//! `ProviderError` represents failures when talking to the chat-completion
//! service. It lives in `quizforge-core` so the session loop and the CLI can
//! downcast and classify provider failures without string matching.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (missing or invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The API answered without any completion choices.
    #[error("response contained no choices")]
    EmptyResponse,
}

impl ProviderError {
    /// Returns `true` if the error points at the local configuration
    /// (credential or model name) rather than at the service.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }
}

/// Errors raised while building or querying the topic catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("topic catalog is empty")]
    EmptyCatalog,

    #[error("category '{0}' has no subtopics")]
    EmptyCategory(String),

    #[error("unknown category '{name}' (available: {available})")]
    UnknownCategory { name: String, available: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors() {
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_configuration());
        assert!(ProviderError::ModelNotFound("gpt-x".into()).is_configuration());
        assert!(!ProviderError::Timeout(60).is_configuration());
        assert!(!ProviderError::EmptyResponse.is_configuration());
    }

    #[test]
    fn display_includes_status() {
        let err = ProviderError::ApiError {
            status: 503,
            message: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): overloaded");
    }
}
