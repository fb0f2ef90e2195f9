//! LLM error types

use std::time::Duration;

use thiserror::Error;

/// Errors from the generation service boundary
///
/// Every failure mode of the external call is a value here; nothing at
/// this boundary panics or propagates a raw transport error upward.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network-level failure (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the API
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the service
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// API key environment variable is not set
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    /// Response arrived but could not be interpreted
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether this error is worth retrying
    ///
    /// Auth and bad-request errors are permanent; retrying them only
    /// burns quota.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::ApiError { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
