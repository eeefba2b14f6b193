//! Mutation documents and typed payload decoding.

use qr_admin_api::{GraphqlResponse, UserError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A named GraphQL mutation and where its result lives in the response.
///
/// For `productCreate(input: $input) { product { .. } userErrors { .. } }`
/// the root field is `productCreate` and the payload field is `product`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationDocument {
    pub operation_name: &'static str,
    pub root_field: &'static str,
    pub payload_field: &'static str,
    pub query: &'static str,
}

/// A mutation document paired with the variables for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub document: MutationDocument,
    pub variables: Value,
}

impl MutationRequest {
    /// Pair a document with its variables.
    #[must_use]
    pub const fn new(document: MutationDocument, variables: Value) -> Self {
        Self {
            document,
            variables,
        }
    }
}

impl MutationDocument {
    /// Decode the payload object out of a response.
    ///
    /// Checks, in order: top-level `errors`, presence of `data`, the root
    /// field, its `userErrors`, and the payload object. Nothing nested is
    /// read before the error collections are known to be empty.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the response signals an error
    /// or does not contain a decodable payload.
    pub fn decode<T: DeserializeOwned>(
        &self,
        response: GraphqlResponse,
    ) -> std::result::Result<T, String> {
        if response.has_errors() {
            let messages: Vec<&str> = response
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect();
            return Err(messages.join("; "));
        }

        let data = response
            .data
            .ok_or_else(|| "response carried no data".to_string())?;

        let root = non_null(&data, self.root_field)
            .ok_or_else(|| format!("response has no `{}`", self.root_field))?;

        if let Some(user_errors) = non_null(root, "userErrors") {
            let user_errors: Vec<UserError> = serde_json::from_value(user_errors.clone())
                .map_err(|e| format!("malformed userErrors: {e}"))?;
            if !user_errors.is_empty() {
                let messages: Vec<String> = user_errors.iter().map(ToString::to_string).collect();
                return Err(messages.join("; "));
            }
        }

        let payload = non_null(root, self.payload_field).ok_or_else(|| {
            format!(
                "`{}` returned no `{}`",
                self.root_field, self.payload_field
            )
        })?;

        serde_json::from_value(payload.clone())
            .map_err(|e| format!("could not decode `{}`: {e}", self.payload_field))
    }
}

fn non_null<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.get(field).filter(|v| !v.is_null())
}
