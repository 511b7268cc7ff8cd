//! Completion port - interface to the external text-completion service.
//!
//! The pipeline delegates all document "understanding" to an external
//! model; this port keeps prompt construction and response parsing as the
//! only in-scope logic.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for LLM completions. Implementations connect to an external
/// provider and translate provider errors into [`CompletionError`].
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generates a single non-streaming completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError>;
}

/// One completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt guiding model behavior.
    pub system_prompt: String,
    /// The user prompt (the constructed extraction or merge instruction).
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature. Extraction runs near-deterministic.
    pub temperature: f32,
}

impl CompletionRequest {
    /// A request with the pipeline defaults (4000 tokens, 0.1 temperature).
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            max_tokens: 4000,
            temperature: 0.1,
        }
    }
}

/// Completion response content.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text.
    pub content: String,
    /// Model that generated it.
    pub model: String,
}

/// Completion failures, kept distinct so the batch loop can back off on
/// rate limits and timeouts specifically.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the provider (HTTP 429).
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Provider response body did not have the expected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request itself was rejected.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CompletionError {
    /// True when a bounded retry with delay is worthwhile.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited { .. }
                | CompletionError::Timeout { .. }
                | CompletionError::Unavailable(_)
                | CompletionError::Network(_)
        )
    }
}

impl From<CompletionError> for DomainError {
    fn from(err: CompletionError) -> Self {
        let code = match &err {
            CompletionError::RateLimited { .. } => ErrorCode::RateLimited,
            CompletionError::Timeout { .. } => ErrorCode::UpstreamTimeout,
            CompletionError::MalformedResponse(_) => ErrorCode::LlmParseFailed,
            _ => ErrorCode::UpstreamError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(CompletionError::RateLimited { retry_after_secs: 30 }.is_retryable());
        assert!(CompletionError::Timeout { timeout_secs: 60 }.is_retryable());
        assert!(CompletionError::Network("reset".into()).is_retryable());
        assert!(!CompletionError::AuthenticationFailed.is_retryable());
        assert!(!CompletionError::MalformedResponse("bad".into()).is_retryable());
    }

    #[test]
    fn error_codes_map_distinctly() {
        let rate: DomainError = CompletionError::RateLimited { retry_after_secs: 1 }.into();
        assert_eq!(rate.code, ErrorCode::RateLimited);

        let timeout: DomainError = CompletionError::Timeout { timeout_secs: 1 }.into();
        assert_eq!(timeout.code, ErrorCode::UpstreamTimeout);

        let parse: DomainError = CompletionError::MalformedResponse("x".into()).into();
        assert_eq!(parse.code, ErrorCode::LlmParseFailed);
    }

    #[test]
    fn request_defaults_match_pipeline_settings() {
        let req = CompletionRequest::new("system", "prompt");
        assert_eq!(req.max_tokens, 4000);
        assert!((req.temperature - 0.1).abs() < f32::EPSILON);
    }
}
