//! Core error types for qr-admin operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use thiserror::Error;

/// Core error type for qr-admin operations.
#[derive(Debug, Error)]
pub enum Error {
    // Identifier errors
    #[error("invalid resource id '{value}': {reason}")]
    InvalidResourceId { value: String, reason: String },

    // Record source errors
    #[error("failed to load records for shop '{shop}': {reason}")]
    RecordSourceFailed { shop: String, reason: String },

    // Parsing errors
    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },
}

impl Error {
    /// Create an invalid resource id error.
    pub fn invalid_resource_id(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResourceId {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a record source error.
    pub fn record_source_failed(shop: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RecordSourceFailed {
            shop: shop.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::json_parse_failed(err.to_string())
    }
}
