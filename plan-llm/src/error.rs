//! Errors from the LLM collaborator (spec.md §6).

use thiserror::Error;

/// Errors from an `LlmClient::complete` call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request to the backend failed (network, timeout, 5xx).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The backend rate-limited the request.
    #[error("rate limited")]
    RateLimited,

    /// The backend's response could not be parsed as the requested shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LlmError {
    /// Whether retrying this request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::RateLimited | LlmError::RequestFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_variants() {
        assert!(LlmError::RateLimited.is_retryable());
        assert!(LlmError::RequestFailed("timeout".into()).is_retryable());
        assert!(!LlmError::InvalidResponse("bad json".into()).is_retryable());
    }
}
