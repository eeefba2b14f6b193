//! Concurrent invocation tests.
//!
//! Independent submissions share nothing: each run must pair its own
//! product with its own variant, whatever the interleaving.

#![forbid(clippy::unwrap_used)]
#![forbid(clippy::expect_used)]
#![forbid(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Reply, ScriptedClient, product_created};
use futures::future::join_all;
use qr_admin_api::GraphqlResponse;
use qr_admin_workflow::products::{product_create_input, variant_price_input};
use qr_admin_workflow::{
    CreateResult, MutationOrchestrator, MutationRequest, PRODUCT_CREATE, PopulateOptions,
    PricePolicy, Product, ProductVariant, TitlePolicy, VARIANT_UPDATE, WorkflowConfig,
    WorkflowResult, populate_product,
};
use serde_json::json;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn slow_variant_update(variant_id: &str, delay_ms: u64) -> Reply {
    Reply::Delayed(
        Duration::from_millis(delay_ms),
        GraphqlResponse::from_data(json!({
            "productVariantUpdate": {
                "productVariant": {"id": variant_id, "price": "1.00"},
                "userErrors": []
            }
        })),
    )
}

#[tokio::test]
async fn test_two_simultaneous_runs_stay_paired() -> TestResult {
    let first = ScriptedClient::new([
        product_created("gid://Product/1", &["gid://Variant/10"]),
        slow_variant_update("gid://Variant/10", 30),
    ]);
    let second = ScriptedClient::new([
        product_created("gid://Product/2", &["gid://Variant/20"]),
        slow_variant_update("gid://Variant/20", 5),
    ]);
    let options = PopulateOptions {
        title: TitlePolicy::Fixed("Yellow Snowboard".to_string()),
        price: PricePolicy::Fixed(1.0),
        workflow: WorkflowConfig::default(),
    };

    let (a, b) = tokio::join!(
        populate_product(&first, &options),
        populate_product(&second, &options)
    );
    let (a, b) = (a?, b?);

    assert_eq!(a.created().id().as_str(), "gid://Product/1");
    assert_eq!(a.updated().id().as_str(), "gid://Variant/10");
    assert_eq!(b.created().id().as_str(), "gid://Product/2");
    assert_eq!(b.updated().id().as_str(), "gid://Variant/20");
    assert_eq!(first.call_count().await, 2);
    assert_eq!(second.call_count().await, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_spawned_runs_share_one_orchestrator() -> TestResult {
    let orchestrator = Arc::new(MutationOrchestrator::new(WorkflowConfig::default()));

    let handles = (1..=16u64).map(|n| {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move {
            let product = format!("gid://Product/{n}");
            let variant = format!("gid://Variant/{}", n * 100);
            let client = ScriptedClient::new([
                product_created(&product, &[variant.as_str()]),
                slow_variant_update(&variant, (n % 4) * 5),
            ]);
            let result: qr_admin_workflow::Result<WorkflowResult<Product, ProductVariant>> =
                orchestrator
                    .run(
                        &client,
                        MutationRequest::new(
                            PRODUCT_CREATE,
                            product_create_input(&format!("Board {n}")),
                        ),
                        VARIANT_UPDATE,
                        |created: &CreateResult<Product>| {
                            variant_price_input(created.selected_dependent(), "1.00")
                        },
                    )
                    .await;
            (n, result)
        })
    });

    for joined in join_all(handles).await {
        let (n, result) = joined?;
        let result = result?;
        assert_eq!(result.created().id().local_id(), n.to_string());
        assert_eq!(result.updated().id().local_id(), (n * 100).to_string());
    }
    Ok(())
}
