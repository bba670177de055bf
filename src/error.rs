//! Error types for the Mini Sentry SDK.

use thiserror::Error;

/// Result type alias using MiniSentryError.
pub type Result<T> = std::result::Result<T, MiniSentryError>;

/// Errors that can occur when talking to a Mini Sentry server.
#[derive(Error, Debug)]
pub enum MiniSentryError {
    /// The server rejected the request credentials (HTTP 401/403).
    #[error("authentication error: {0}")]
    Auth(String),

    /// The server's per-token rate limiter refused the request (HTTP 429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success response from the server.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure (connection refused, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MiniSentryError {
    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a rate-limit error.
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create an API error with status code.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
