//! Admin API client.
//!
//! This module provides the `AdminClient`, a reqwest-backed
//! [`GraphqlClient`] that posts documents to a shop's GraphQL endpoint.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use qr_admin_core::GenericResultExt;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::AdminApiConfig;
use crate::error::{Error, Result};
use crate::graphql::{GraphqlClient, GraphqlRequest, GraphqlResponse};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const SHOP_NAME_QUERY: &str = "query shopName { shop { name } }";

/// Authenticated client for one shop's Admin GraphQL API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    /// Configuration for the client.
    config: Arc<AdminApiConfig>,
    /// Resolved GraphQL endpoint.
    endpoint: Url,
    /// HTTP client.
    http_client: reqwest::Client,
}

impl AdminClient {
    /// Create a new client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is incomplete, or
    /// [`Error::ConnectionFailed`] if the HTTP client cannot be built.
    pub fn with_config(config: AdminApiConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.graphql_url()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::connection_failed(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            http_client,
        })
    }

    /// The endpoint requests are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Shop domain this client is bound to.
    #[must_use]
    pub fn shop(&self) -> &str {
        &self.config.shop
    }

    /// Fetch the shop name; used to confirm the token is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports errors, or the
    /// response has no `shop.name`.
    pub async fn shop_name(&self) -> Result<String> {
        let response = self.execute(SHOP_NAME_QUERY, Value::Null).await?;

        if let Some(error) = response.errors.first() {
            return Err(Error::invalid_response(error.message.clone()));
        }

        response
            .data
            .as_ref()
            .and_then(|data| data.pointer("/shop/name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_response("response has no shop name"))
    }

    /// Execute a single request attempt.
    async fn post(&self, document: &str, variables: &Value) -> Result<GraphqlResponse> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&GraphqlRequest {
                query: document,
                variables,
            })
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("body is not a GraphQL response: {e}")))
    }

    /// Map a reqwest failure onto the client error taxonomy.
    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
            Error::timeout(timeout_ms)
        } else if error.is_connect() {
            Error::connection_failed(error.to_string())
        } else {
            Error::Http(error)
        }
    }
}

#[async_trait]
impl GraphqlClient for AdminClient {
    async fn execute(&self, document: &str, variables: Value) -> Result<GraphqlResponse> {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, "Posting GraphQL document");

        self.post(document, &variables)
            .await
            .tap_ok(|response| {
                debug!(
                    duration_ms = start.elapsed().as_millis(),
                    errors = response.errors.len(),
                    "GraphQL request complete"
                );
            })
            .tap_err(|e| {
                warn!(duration_ms = start.elapsed().as_millis(), error = %e, "GraphQL request failed");
            })
    }
}
