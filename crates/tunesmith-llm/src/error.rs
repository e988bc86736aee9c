//! Error types for LLM provider calls.

use std::time::Duration;

use thiserror::Error;
use tunesmith_spec::StageError;

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while calling an LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The call did not finish within its timeout.
    #[error("LLM call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The call was cancelled by its token.
    #[error("LLM call was cancelled")]
    Cancelled,

    /// The provider answered with no usable text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The response body could not be parsed.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// Unknown provider id.
    #[error("unknown LLM provider '{0}'. Expected one of: groq, openai, anthropic")]
    UnknownProvider(String),

    /// No API key for the configured provider.
    #[error("no API key configured for provider '{0}'")]
    MissingApiKey(&'static str),

    /// No provider is configured at all.
    #[error("no LLM provider is configured")]
    NotConfigured,
}

impl LlmError {
    /// Creates a bad status error.
    pub fn bad_status(status: u16, body: impl Into<String>) -> Self {
        Self::BadStatus {
            status,
            body: body.into(),
        }
    }

    /// True for failures worth another attempt: transport errors, timeouts,
    /// 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) | LlmError::Timeout(_) => true,
            LlmError::BadStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status, when the provider answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::BadStatus { status, .. } => Some(*status),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short machine-readable kind for trace error events.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Http(_) => "http",
            LlmError::BadStatus { .. } => "bad_status",
            LlmError::Timeout(_) => "timeout",
            LlmError::Cancelled => "cancelled",
            LlmError::EmptyResponse => "empty_response",
            LlmError::Parse(_) => "parse",
            LlmError::UnknownProvider(_) => "unknown_provider",
            LlmError::MissingApiKey(_) => "missing_api_key",
            LlmError::NotConfigured => "not_configured",
        }
    }
}

impl StageError for LlmError {
    fn code(&self) -> &'static str {
        match self {
            LlmError::Http(_) => "LLM_001",
            LlmError::BadStatus { .. } => "LLM_002",
            LlmError::Timeout(_) => "LLM_003",
            LlmError::Cancelled => "LLM_004",
            LlmError::EmptyResponse => "LLM_005",
            LlmError::Parse(_) => "LLM_006",
            LlmError::UnknownProvider(_) => "LLM_007",
            LlmError::MissingApiKey(_) => "LLM_008",
            LlmError::NotConfigured => "LLM_009",
        }
    }

    fn category(&self) -> &'static str {
        "llm"
    }
}
