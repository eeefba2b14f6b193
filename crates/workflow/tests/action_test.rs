//! Tests for the generate-product page action.

#![forbid(clippy::unwrap_used)]
#![forbid(clippy::expect_used)]
#![forbid(clippy::panic)]

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use common::{ScriptedClient, graphql_errors, product_created, variant_updated};
use qr_admin_core::{QrCodeRecord, RecordSource, ResourceId, StaticRecordSource};
use qr_admin_workflow::{
    Error, GenerateProductAction, PRODUCT_CREATED_NOTICE, Phase, PopulateOptions, PricePolicy,
    TitlePolicy, WorkflowConfig,
};
use serde_json::json;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SHOP: &str = "demo.myshopify.com";

fn record(id: u64, product: &str) -> Result<QrCodeRecord, qr_admin_core::Error> {
    Ok(QrCodeRecord {
        id,
        title: format!("QR {id}"),
        shop: SHOP.to_string(),
        product_id: ResourceId::parse(product)?,
        product_handle: None,
        product_variant_id: None,
        product_title: Some("Red Snowboard".to_string()),
        product_image: None,
        product_deleted: false,
        destination: Some("product".to_string()),
        scans: id,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default(),
    })
}

fn options() -> PopulateOptions {
    PopulateOptions {
        title: TitlePolicy::Fixed("Orange Snowboard".to_string()),
        price: PricePolicy::Fixed(19.99),
        workflow: WorkflowConfig::default(),
    }
}

struct BrokenSource;

#[async_trait]
impl RecordSource for BrokenSource {
    async fn list(&self, shop: &str) -> qr_admin_core::Result<Vec<QrCodeRecord>> {
        Err(qr_admin_core::Error::record_source_failed(shop, "database is locked"))
    }
}

#[tokio::test]
async fn test_submit_returns_result_notice_and_records() -> TestResult {
    let client = Arc::new(ScriptedClient::new([
        product_created("gid://shopify/Product/108828309", &["gid://shopify/ProductVariant/1"]),
        variant_updated("gid://shopify/ProductVariant/1", "19.99"),
    ]));
    let records = Arc::new(StaticRecordSource::new(vec![record(
        1,
        "gid://shopify/Product/5",
    )?]));

    let action = GenerateProductAction::new(client.clone(), records, SHOP).with_options(options());
    let outcome = action.submit().await?;

    assert_eq!(outcome.notice, PRODUCT_CREATED_NOTICE);
    assert_eq!(outcome.product_number(), "108828309");
    assert_eq!(outcome.records.len(), 1);

    let data = outcome.to_json()?;
    assert_eq!(
        data.pointer("/product/id"),
        Some(&json!("gid://shopify/Product/108828309"))
    );
    assert_eq!(data.pointer("/variant/price"), Some(&json!("19.99")));
    assert_eq!(client.call_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_workflow_errors_propagate_unchanged() -> TestResult {
    let client = Arc::new(ScriptedClient::new([graphql_errors("Throttled")]));
    let action = GenerateProductAction::new(
        client.clone(),
        Arc::new(StaticRecordSource::default()),
        SHOP,
    )
    .with_options(options());

    let result = action.submit().await;

    assert!(matches!(
        result,
        Err(Error::MutationFailed {
            phase: Phase::Create,
            ..
        })
    ));
    assert_eq!(client.call_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_refresh_failure_keeps_created_id() -> TestResult {
    let client = Arc::new(ScriptedClient::new([
        product_created("gid://shopify/Product/3", &["gid://shopify/ProductVariant/30"]),
        variant_updated("gid://shopify/ProductVariant/30", "19.99"),
    ]));
    let action =
        GenerateProductAction::new(client, Arc::new(BrokenSource), SHOP).with_options(options());

    let result = action.submit().await;

    match result {
        Err(error @ Error::RefreshFailed { .. }) => {
            assert_eq!(
                error.created_id().map(ResourceId::as_str),
                Some("gid://shopify/Product/3")
            );
            assert!(error.to_string().contains("database is locked"));
        }
        Err(other) => return Err(format!("expected refresh failure, got {other}").into()),
        Ok(_) => return Err("expected refresh failure, got success".into()),
    }
    Ok(())
}
