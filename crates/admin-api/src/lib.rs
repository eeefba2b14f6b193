#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # qr-admin-api
//!
//! Typed client for a store's Admin GraphQL API.
//!
//! ## Example
//!
//! ```ignore
//! use qr_admin_api::{AdminApiConfig, AdminClient, GraphqlClient};
//!
//! let client = AdminClient::with_config(AdminApiConfig::from_env())?;
//! let response = client
//!     .execute("query { shop { name } }", serde_json::Value::Null)
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;

pub use client::AdminClient;
pub use config::{AdminApiConfig, DEFAULT_API_VERSION};
pub use error::{Error, Result};
pub use graphql::{GraphqlClient, GraphqlError, GraphqlRequest, GraphqlResponse, UserError};
