//! # qr-admin-core
//!
//! Core types shared by the qr-admin crates: the error and result types,
//! global resource identifiers, and the QR code record contract.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod id;
pub mod record;
pub mod result;

pub use error::Error;
pub use id::ResourceId;
pub use record::{QrCodeRecord, RecordSource, StaticRecordSource};
pub use result::{GenericResultExt, Result};
