//! Error types for dependent mutation workflows.

use std::fmt;

use qr_admin_core::ResourceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two mutations an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Create,
    Update,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Workflow error types.
///
/// Every variant raised after the create mutation succeeded carries the id
/// of the resource it created; nothing is rolled back.
#[derive(Debug, Error)]
pub enum Error {
    /// The API could not be reached, or did not answer in time.
    ///
    /// `outcome_unknown` is set when the request may have been applied
    /// anyway (timeouts, 5xx, dropped responses).
    #[error("transport failure during {phase}: {reason}")]
    Transport {
        phase: Phase,
        reason: String,
        created_id: Option<ResourceId>,
        outcome_unknown: bool,
    },

    /// The API answered with errors or without the expected object.
    #[error("{phase} mutation failed: {reason}")]
    MutationFailed {
        phase: Phase,
        reason: String,
        created_id: Option<ResourceId>,
    },

    /// The created resource came back without any dependent sub-resource.
    #[error("created resource {created_id} has no dependent resources to update")]
    MissingDependentResource { created_id: ResourceId },

    /// The record list could not be refreshed after a successful run.
    #[error("created {created_id} but failed to refresh records: {reason}")]
    RefreshFailed {
        created_id: ResourceId,
        reason: String,
    },

    /// Input rejected before any mutation was sent.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl Error {
    /// Create a transport error for a request the API never acted on.
    pub fn transport(
        phase: Phase,
        reason: impl Into<String>,
        created_id: Option<ResourceId>,
    ) -> Self {
        Self::Transport {
            phase,
            reason: reason.into(),
            created_id,
            outcome_unknown: false,
        }
    }

    /// Create a transport error for a request that may have been applied.
    pub fn transport_uncertain(
        phase: Phase,
        reason: impl Into<String>,
        created_id: Option<ResourceId>,
    ) -> Self {
        Self::Transport {
            phase,
            reason: reason.into(),
            created_id,
            outcome_unknown: true,
        }
    }

    /// Create a mutation failed error.
    pub fn mutation_failed(
        phase: Phase,
        reason: impl Into<String>,
        created_id: Option<ResourceId>,
    ) -> Self {
        Self::MutationFailed {
            phase,
            reason: reason.into(),
            created_id,
        }
    }

    /// Create a missing dependent resource error.
    #[must_use]
    pub const fn missing_dependent_resource(created_id: ResourceId) -> Self {
        Self::MissingDependentResource { created_id }
    }

    /// Create a refresh failed error.
    pub fn refresh_failed(created_id: ResourceId, reason: impl Into<String>) -> Self {
        Self::RefreshFailed {
            created_id,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Phase the failure happened in, if it happened inside a mutation.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::Transport { phase, .. } | Self::MutationFailed { phase, .. } => Some(*phase),
            Self::MissingDependentResource { .. } => Some(Phase::Create),
            Self::RefreshFailed { .. } | Self::InvalidInput { .. } => None,
        }
    }

    /// Id of the resource already created before the failure, if any.
    #[must_use]
    pub const fn created_id(&self) -> Option<&ResourceId> {
        match self {
            Self::Transport { created_id, .. } | Self::MutationFailed { created_id, .. } => {
                created_id.as_ref()
            }
            Self::MissingDependentResource { created_id }
            | Self::RefreshFailed { created_id, .. } => Some(created_id),
            Self::InvalidInput { .. } => None,
        }
    }

    /// Whether re-running the whole workflow is safe and may succeed.
    ///
    /// Only create-phase transport failures where the API certainly did not
    /// act qualify. A create call that timed out or hit a 5xx may still
    /// have made a product, and re-running it could make a duplicate.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                phase: Phase::Create,
                created_id: None,
                outcome_unknown: false,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_id() -> std::result::Result<ResourceId, qr_admin_core::Error> {
        ResourceId::parse("gid://shopify/Product/1")
    }

    #[test]
    fn test_only_create_transport_is_retryable() -> std::result::Result<(), qr_admin_core::Error> {
        assert!(Error::transport(Phase::Create, "refused", None).is_retryable());
        assert!(!Error::transport(Phase::Update, "refused", Some(product_id()?)).is_retryable());
        assert!(!Error::mutation_failed(Phase::Create, "Title can't be blank", None).is_retryable());
        assert!(!Error::missing_dependent_resource(product_id()?).is_retryable());
        assert!(!Error::invalid_input("price must be finite").is_retryable());
        Ok(())
    }

    #[test]
    fn test_uncertain_create_transport_is_not_retryable() {
        let error = Error::transport_uncertain(Phase::Create, "no response within 5000ms", None);
        assert!(!error.is_retryable());
        assert!(error.created_id().is_none());
        assert_eq!(error.phase(), Some(Phase::Create));
    }

    #[test]
    fn test_created_id_is_exposed() -> std::result::Result<(), qr_admin_core::Error> {
        let id = product_id()?;
        let error = Error::mutation_failed(Phase::Update, "Price is invalid", Some(id.clone()));
        assert_eq!(error.created_id(), Some(&id));
        assert_eq!(error.phase(), Some(Phase::Update));

        let error = Error::mutation_failed(Phase::Create, "boom", None);
        assert_eq!(error.created_id(), None);
        Ok(())
    }

    #[test]
    fn test_display() -> std::result::Result<(), qr_admin_core::Error> {
        assert_eq!(
            Error::mutation_failed(Phase::Create, "Title can't be blank", None).to_string(),
            "create mutation failed: Title can't be blank"
        );
        assert_eq!(
            Error::missing_dependent_resource(product_id()?).to_string(),
            "created resource gid://shopify/Product/1 has no dependent resources to update"
        );
        Ok(())
    }
}
