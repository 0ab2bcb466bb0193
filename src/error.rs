//! Eventsmith error types

use std::time::Duration;

/// Eventsmith error types
#[derive(Debug, thiserror::Error)]
pub enum EventsmithError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cache storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no completion provider configured")]
    NoProvider,
}

impl EventsmithError {
    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Network failures, rate limits, server-side (5xx) errors and empty
    /// completions are transient. Authentication, bad input and
    /// configuration problems are not.
    pub fn is_transient(&self) -> bool {
        match self {
            EventsmithError::Http(_)
            | EventsmithError::RateLimited { .. }
            | EventsmithError::EmptyResponse => true,
            EventsmithError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied backoff hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            EventsmithError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for Eventsmith operations
pub type Result<T> = std::result::Result<T, EventsmithError>;
