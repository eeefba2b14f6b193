//! Shared test doubles for workflow integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use qr_admin_api::{Error as ApiError, GraphqlClient, GraphqlResponse};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// One scripted reply.
pub enum Reply {
    Response(GraphqlResponse),
    Failure(ApiError),
    Delayed(Duration, GraphqlResponse),
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct Call {
    pub document: String,
    pub variables: Value,
}

/// GraphQL client that answers from a script and records every call.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl GraphqlClient for ScriptedClient {
    async fn execute(&self, document: &str, variables: Value) -> qr_admin_api::Result<GraphqlResponse> {
        self.calls.lock().await.push(Call {
            document: document.to_string(),
            variables,
        });

        let reply = self.replies.lock().await.pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(error)) => Err(error),
            Some(Reply::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(ApiError::invalid_response("no scripted reply left")),
        }
    }
}

/// `productCreate` response with the given variant ids.
pub fn product_created(product_id: &str, variant_ids: &[&str]) -> Reply {
    let edges: Vec<Value> = variant_ids
        .iter()
        .map(|id| json!({"node": {"id": id, "price": "0.00", "barcode": null}}))
        .collect();

    Reply::Response(GraphqlResponse::from_data(json!({
        "productCreate": {
            "product": {
                "id": product_id,
                "title": "Red Snowboard",
                "handle": "red-snowboard",
                "status": "ACTIVE",
                "variants": {"edges": edges}
            },
            "userErrors": []
        }
    })))
}

/// `productVariantUpdate` response.
pub fn variant_updated(variant_id: &str, price: &str) -> Reply {
    Reply::Response(GraphqlResponse::from_data(json!({
        "productVariantUpdate": {
            "productVariant": {
                "id": variant_id,
                "price": price,
                "barcode": null,
                "createdAt": "2024-06-01T12:00:00Z"
            },
            "userErrors": []
        }
    })))
}

/// Response with top-level GraphQL errors only.
pub fn graphql_errors(message: &str) -> Reply {
    Reply::Response(GraphqlResponse::from_errors([message]))
}

/// Mutation payload with `userErrors` and a null object.
pub fn user_errors(root_field: &str, payload_field: &str, message: &str) -> Reply {
    Reply::Response(GraphqlResponse::from_data(json!({
        root_field: {
            payload_field: null,
            "userErrors": [{"field": ["input"], "message": message}]
        }
    })))
}
