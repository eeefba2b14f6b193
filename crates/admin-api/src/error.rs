//! Error types for the Admin API client.

use thiserror::Error;

/// Result type for Admin API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the Admin API.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to connect to the API host.
    #[error("connection failed: {reason}")]
    ConnectionFailed { reason: String },

    /// Request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The API answered with a non-success HTTP status.
    #[error("API returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body could not be decoded as a GraphQL response.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    /// Configuration error.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// HTTP error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parse error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a connection failed error.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            reason: reason.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub const fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Create an HTTP status error.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Create a config error.
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Whether the request may never have reached the API, or the API was
    /// temporarily unable to serve it (throttling, 5xx).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::Http(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the API certainly did not act on the request.
    ///
    /// True only when no connection was made or the API throttled the call
    /// (429). Timeouts, 5xx and mid-request failures may follow a mutation
    /// that was already applied.
    #[must_use]
    pub const fn is_unsent(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429,
            _ => false,
        }
    }
}
