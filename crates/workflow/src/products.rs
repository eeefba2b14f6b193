//! Demo product population: create a product, then reprice its first variant.

use chrono::{DateTime, Utc};
use qr_admin_api::GraphqlClient;
use qr_admin_core::ResourceId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::error::{Error, Result};
use crate::mutation::{MutationDocument, MutationRequest};
use crate::orchestrator::{
    CreateResult, DependentResource, Identified, MutationOrchestrator, WorkflowConfig,
    WorkflowResult,
};

/// Colors the default title policy picks from.
pub const TITLE_COLORS: [&str; 4] = ["Red", "Orange", "Yellow", "Green"];

/// Upper bound (exclusive) of the default random price.
pub const DEFAULT_MAX_PRICE: f64 = 100.0;

pub const PRODUCT_CREATE: MutationDocument = MutationDocument {
    operation_name: "populateProduct",
    root_field: "productCreate",
    payload_field: "product",
    query: r"mutation populateProduct($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      handle
      status
      variants(first: 10) {
        edges {
          node {
            id
            price
            barcode
            createdAt
          }
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}",
};

pub const VARIANT_UPDATE: MutationDocument = MutationDocument {
    operation_name: "updateVariantPrice",
    root_field: "productVariantUpdate",
    payload_field: "productVariant",
    query: r"mutation updateVariantPrice($input: ProductVariantInput!) {
  productVariantUpdate(input: $input) {
    productVariant {
      id
      price
      barcode
      createdAt
    }
    userErrors {
      field
      message
    }
  }
}",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Archived,
    Draft,
    #[serde(other)]
    Unknown,
}

/// GraphQL connection wrapper (`edges { node { .. } }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: ResourceId,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl DependentResource for Product {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn dependent_ids(&self) -> Vec<ResourceId> {
        self.variants.nodes().map(|v| v.id.clone()).collect()
    }
}

impl Identified for ProductVariant {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// How the demo product's title is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TitlePolicy {
    /// `"<color> Snowboard"` with a color drawn from [`TITLE_COLORS`].
    #[default]
    RandomColor,
    Fixed(String),
}

impl TitlePolicy {
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::RandomColor => {
                let color = TITLE_COLORS
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or("Red");
                format!("{color} Snowboard")
            }
            Self::Fixed(title) => title.clone(),
        }
    }
}

/// How the variant's new price is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PricePolicy {
    /// Uniform in `[0, DEFAULT_MAX_PRICE)`.
    #[default]
    Random,
    Fixed(f64),
}

impl PricePolicy {
    /// Price as the decimal string the API expects, two places.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a fixed price fails
    /// [`validate_price`].
    pub fn price(&self) -> Result<String> {
        let amount = match self {
            Self::Random => rand::thread_rng().gen_range(0.0..DEFAULT_MAX_PRICE),
            Self::Fixed(amount) => validate_price(*amount)?,
        };
        Ok(format!("{amount:.2}"))
    }
}

/// Accept a price only if it is finite and not negative.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for NaN, infinite, or negative amounts.
pub fn validate_price(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        // -0.0 passes the check but would format as "-0.00"
        Ok(amount.abs())
    } else {
        Err(Error::invalid_input(format!(
            "price must be a finite amount of at least 0, got {amount}"
        )))
    }
}

/// Inputs for [`populate_product`].
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
    pub title: TitlePolicy,
    pub price: PricePolicy,
    pub workflow: WorkflowConfig,
}

pub type ProductPopulation = WorkflowResult<Product, ProductVariant>;

/// Variables for `productCreate`.
#[must_use]
pub fn product_create_input(title: &str) -> Value {
    json!({ "input": { "title": title } })
}

/// Variables for `productVariantUpdate`.
#[must_use]
pub fn variant_price_input(variant_id: &ResourceId, price: &str) -> Value {
    json!({ "input": { "id": variant_id, "price": price } })
}

/// Create a demo product and set a new price on its first variant.
///
/// The price is resolved before anything is sent, so an unusable fixed
/// price never leaves a product behind.
///
/// # Errors
///
/// [`Error::InvalidInput`] for a rejected price, otherwise see
/// [`MutationOrchestrator::run`].
pub async fn populate_product<C>(client: &C, options: &PopulateOptions) -> Result<ProductPopulation>
where
    C: GraphqlClient + ?Sized,
{
    let price = options.price.price()?;
    let title = options.title.title();
    info!(%title, %price, "Populating demo product");

    MutationOrchestrator::new(options.workflow.clone())
        .run(
            client,
            MutationRequest::new(PRODUCT_CREATE, product_create_input(&title)),
            VARIANT_UPDATE,
            |created: &CreateResult<Product>| {
                variant_price_input(created.selected_dependent(), &price)
            },
        )
        .await
}
