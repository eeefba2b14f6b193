//! GraphQL wire types and the executor trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Body posted to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// Top-level GraphQL response envelope.
///
/// `data` may be partially present alongside `errors`; callers must check
/// `errors` before trusting anything under `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    /// A response carrying only data.
    #[must_use]
    pub const fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A response carrying only top-level errors.
    pub fn from_errors(messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            data: None,
            errors: messages.into_iter().map(GraphqlError::new).collect(),
        }
    }

    /// Whether the API reported any top-level error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A top-level GraphQL error entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    /// Create an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

/// Validation error returned inside a mutation payload (`userErrors`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field {
            Some(ref field) if !field.is_empty() => {
                write!(f, "{}: {}", field.join("."), self.message)
            }
            _ => f.write_str(&self.message),
        }
    }
}

/// An authenticated handle able to run GraphQL documents.
///
/// Implementations must be safe to share between concurrent invocations.
#[async_trait]
pub trait GraphqlClient: Send + Sync {
    /// Execute `document` with `variables` and return the decoded envelope.
    ///
    /// Application-level failures come back inside
    /// [`GraphqlResponse::errors`]; `Err` is reserved for failures to obtain
    /// a response at all.
    ///
    /// # Errors
    ///
    /// Returns a transport error (see [`crate::Error::is_transport`]) or an
    /// invalid-response error when the body is not a GraphQL envelope.
    async fn execute(&self, document: &str, variables: Value) -> Result<GraphqlResponse>;
}
