#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # qr-admin
//!
//! Create demo products through the store Admin GraphQL API.
//!
//! This library re-exports the workspace crates for convenience.

pub use qr_admin_api;
pub use qr_admin_core;
pub use qr_admin_workflow;

pub mod cli;
pub mod commands;
