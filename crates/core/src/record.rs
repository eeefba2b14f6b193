//! QR code records and the data-access contract that supplies them.
//!
//! Records are read-only here: the presentation layer renders them and the
//! product workflow only asks for a fresh list after it finishes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ResourceId;
use crate::result::Result;

/// A QR code tied to a store product, as listed on the admin page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRecord {
    pub id: u64,
    pub title: String,
    pub shop: String,
    pub product_id: ResourceId,
    #[serde(default)]
    pub product_handle: Option<String>,
    #[serde(default)]
    pub product_variant_id: Option<ResourceId>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    /// Set when the linked product no longer exists in the store.
    #[serde(default)]
    pub product_deleted: bool,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub scans: u64,
    pub created_at: DateTime<Utc>,
}

/// Supplies the QR code records for a shop.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// List every record for `shop`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RecordSourceFailed`] when the backing store
    /// cannot be read.
    async fn list(&self, shop: &str) -> Result<Vec<QrCodeRecord>>;
}

/// Record source backed by a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    records: Vec<QrCodeRecord>,
}

impl StaticRecordSource {
    /// Create a source from a snapshot of records.
    #[must_use]
    pub const fn new(records: Vec<QrCodeRecord>) -> Self {
        Self { records }
    }

    /// Load a snapshot from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonParseFailed`] if the document is not an
    /// array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn list(&self, shop: &str) -> Result<Vec<QrCodeRecord>> {
        let mut records: Vec<QrCodeRecord> = self
            .records
            .iter()
            .filter(|record| record.shop == shop)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {
            "id": 1,
            "title": "Spring promo",
            "shop": "demo.myshopify.com",
            "productId": "gid://shopify/Product/1",
            "productTitle": "Red Snowboard",
            "scans": 12,
            "createdAt": "2024-03-01T10:00:00Z"
        },
        {
            "id": 2,
            "title": "Old flyer",
            "shop": "demo.myshopify.com",
            "productId": "gid://shopify/Product/2",
            "productDeleted": true,
            "createdAt": "2024-04-01T10:00:00Z"
        },
        {
            "id": 3,
            "title": "Other store",
            "shop": "other.myshopify.com",
            "productId": "gid://shopify/Product/3",
            "createdAt": "2024-05-01T10:00:00Z"
        }
    ]"#;

    #[tokio::test]
    async fn test_static_source_filters_by_shop_newest_first()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = StaticRecordSource::from_json(SNAPSHOT)?;
        let records = source.list("demo.myshopify.com").await?;

        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(records.iter().any(|r| r.product_deleted));
        assert_eq!(
            records.iter().find(|r| r.id == 1).map(|r| r.scans),
            Some(12)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_static_source_unknown_shop_is_empty()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = StaticRecordSource::from_json(SNAPSHOT)?;
        assert!(source.list("nobody.myshopify.com").await?.is_empty());
        Ok(())
    }

    #[test]
    fn test_snapshot_with_bad_id_is_rejected() {
        let bad = r#"[{"id":1,"title":"x","shop":"s","productId":"42","createdAt":"2024-01-01T00:00:00Z"}]"#;
        assert!(StaticRecordSource::from_json(bad).is_err());
    }
}
