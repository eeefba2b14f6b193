//! Global resource identifiers.
//!
//! The Admin API names every object with an opaque token of the form
//! `gid://<namespace>/<ResourceType>/<local-id>`. The namespace segment is
//! optional (`gid://Product/1` is accepted). The raw token is what gets sent
//! back to the API; the parsed parts are only for display and matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;

const SCHEME: &str = "gid://";

/// Opaque, globally unique identifier namespaced by resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Parse and validate a global id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResourceId`] when the token lacks the `gid://`
    /// scheme or does not contain both a resource type and a local id.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let rest = value
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::invalid_resource_id(&value, "missing gid:// scheme"))?;

        let mut segments = rest.rsplit('/');
        let local = segments.next().unwrap_or_default();
        let kind = segments.next().unwrap_or_default();

        if local.is_empty() {
            return Err(Error::invalid_resource_id(&value, "missing local id"));
        }
        if kind.is_empty() {
            return Err(Error::invalid_resource_id(&value, "missing resource type"));
        }

        Ok(Self(value))
    }

    /// The full token, as the API expects it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource type segment, e.g. `Product` or `ProductVariant`.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        self.segments().1
    }

    /// Trailing local id, e.g. `1` for `gid://shopify/Product/1`.
    #[must_use]
    pub fn local_id(&self) -> &str {
        self.segments().0
    }

    /// Whether this id names a resource of the given type.
    #[must_use]
    pub fn is_a(&self, resource_type: &str) -> bool {
        self.resource_type() == resource_type
    }

    fn segments(&self) -> (&str, &str) {
        let rest = self.0.strip_prefix(SCHEME).unwrap_or(&self.0);
        let mut segments = rest.rsplit('/');
        let local = segments.next().unwrap_or_default();
        let kind = segments.next().unwrap_or_default();
        (local, kind)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
