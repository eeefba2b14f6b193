//! The "generate product" page action.
//!
//! One submission runs the product population workflow once, then reloads
//! the QR code list so the page can render it alongside a transient notice.

use std::sync::Arc;

use qr_admin_api::GraphqlClient;
use qr_admin_core::{GenericResultExt, QrCodeRecord, RecordSource};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::products::{PopulateOptions, Product, ProductPopulation, ProductVariant, populate_product};

/// Notice shown after a product is created.
pub const PRODUCT_CREATED_NOTICE: &str = "Product created";

/// Everything the page needs after a successful submission.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub result: ProductPopulation,
    pub notice: String,
    pub records: Vec<QrCodeRecord>,
}

#[derive(Serialize)]
struct ActionData<'a> {
    product: &'a Product,
    variant: &'a ProductVariant,
}

impl ActionOutcome {
    /// Numeric product id, without the `gid://` prefix.
    #[must_use]
    pub fn product_number(&self) -> &str {
        self.result.created().id().local_id()
    }

    /// `{ product, variant }` as returned to the page.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if either resource cannot be encoded.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(ActionData {
            product: self.result.created().resource(),
            variant: self.result.updated().resource(),
        })
    }
}

/// Handles "generate product" submissions for one shop.
#[derive(Clone)]
pub struct GenerateProductAction {
    client: Arc<dyn GraphqlClient>,
    records: Arc<dyn RecordSource>,
    shop: String,
    options: PopulateOptions,
}

impl GenerateProductAction {
    pub fn new(
        client: Arc<dyn GraphqlClient>,
        records: Arc<dyn RecordSource>,
        shop: impl Into<String>,
    ) -> Self {
        Self {
            client,
            records,
            shop: shop.into(),
            options: PopulateOptions::default(),
        }
    }

    /// Replace the population options (title/price policies, timeouts).
    #[must_use]
    pub fn with_options(mut self, options: PopulateOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one submission.
    ///
    /// # Errors
    ///
    /// Workflow errors propagate unchanged. A failed record refresh after a
    /// successful workflow becomes [`Error::RefreshFailed`] carrying the
    /// created product id.
    pub async fn submit(&self) -> Result<ActionOutcome> {
        info!(shop = %self.shop, "Generate product submitted");

        let result = populate_product(self.client.as_ref(), &self.options).await?;

        let records = self
            .records
            .list(&self.shop)
            .await
            .map_err(|e| Error::refresh_failed(result.created().id().clone(), e.to_string()))
            .tap_err(|e| error!(error = %e, "Record refresh failed"))?;

        Ok(ActionOutcome {
            result,
            notice: PRODUCT_CREATED_NOTICE.to_string(),
            records,
        })
    }
}
