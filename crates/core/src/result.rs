//! Result type definition and extension traits.
//!
//! Provides tap-style combinators so call sites can log on the way through
//! without unwrap/expect or a nested match.

use crate::error::Error;

/// The standard Result type for qr-admin core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for any Result type (not just `qr_admin_core::Result`).
pub trait GenericResultExt<T, E> {
    /// Perform a side effect on Ok value without consuming the Result.
    #[must_use]
    fn tap_ok<F: FnOnce(&T)>(self, f: F) -> Self;

    /// Perform a side effect on Err value without consuming the Result.
    #[must_use]
    fn tap_err<F: FnOnce(&E)>(self, f: F) -> Self;

    /// Get the value or a default, logging the error if present.
    fn or_default_logged(self, default: T) -> T
    where
        E: std::fmt::Display;
}

impl<T, E> GenericResultExt<T, E> for std::result::Result<T, E> {
    fn tap_ok<F: FnOnce(&T)>(self, f: F) -> Self {
        if let Ok(ref v) = self {
            f(v);
        }
        self
    }

    fn tap_err<F: FnOnce(&E)>(self, f: F) -> Self {
        if let Err(ref e) = self {
            f(e);
        }
        self
    }

    fn or_default_logged(self, default: T) -> T
    where
        E: std::fmt::Display,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Operation failed, using default: {}", e);
                default
            }
        }
    }
}
