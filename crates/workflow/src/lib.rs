//! Dependent create-then-update mutation workflows.
//!
//! Some Admin API objects only exist as a side effect of creating their
//! parent: creating a product creates its first variant. Updating that
//! variant means two strictly sequential mutations, the second fed by an id
//! the first one returned. This crate provides:
//!
//! - **Orchestration**: [`MutationOrchestrator`] runs create, selects the
//!   first dependent id, runs update, and returns a [`WorkflowResult`] or a
//!   typed [`Error`]. Each mutation runs at most once per invocation.
//! - **Typed decoding**: [`MutationDocument::decode`] checks `errors` and
//!   `userErrors` before touching nested fields.
//! - **Product population**: [`populate_product`] with injectable title and
//!   price policies.
//! - **Page action**: [`GenerateProductAction`] runs one population and
//!   reloads the QR code records.
//! - **Caller retry**: [`run_with_retry`] re-runs whole sequences, only
//!   while the API certainly has not created anything.
//!
//! # Example
//!
//! ```ignore
//! use qr_admin_api::{AdminApiConfig, AdminClient};
//! use qr_admin_workflow::{populate_product, PopulateOptions};
//!
//! let client = AdminClient::with_config(AdminApiConfig::from_env())?;
//! let result = populate_product(&client, &PopulateOptions::default()).await?;
//! println!("created {}", result.created().id());
//! ```

#![forbid(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod action;
pub mod error;
pub mod mutation;
pub mod orchestrator;
pub mod products;
pub mod retry;

pub use action::{ActionOutcome, GenerateProductAction, PRODUCT_CREATED_NOTICE};
pub use error::{Error, Phase, Result};
pub use mutation::{MutationDocument, MutationRequest};
pub use orchestrator::{
    CreateResult, DEFAULT_CALL_TIMEOUT, DependentResource, Identified, MutationOrchestrator,
    UpdateResult, WorkflowConfig, WorkflowResult, run_dependent_mutation,
};
pub use products::{
    PRODUCT_CREATE, PopulateOptions, PricePolicy, Product, ProductPopulation, ProductStatus,
    ProductVariant, TITLE_COLORS, TitlePolicy, VARIANT_UPDATE, populate_product, validate_price,
};
pub use retry::{RetryPolicy, run_with_retry};
