//! CLI command handlers.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use qr_admin_api::{AdminApiConfig, AdminClient};
use qr_admin_core::StaticRecordSource;
use qr_admin_workflow::{
    GenerateProductAction, PopulateOptions, PricePolicy, RetryPolicy, TitlePolicy, WorkflowConfig,
    run_with_retry,
};

use crate::cli::Commands;

/// Execute a CLI command.
pub async fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::GenerateProduct {
            config,
            title,
            price,
            retries,
            records,
        } => cmd_generate_product(config, title, price, retries, records).await,

        Commands::ShopName { config } => cmd_shop_name(config).await,
    }
}

/// Create a demo product, price its first variant, and list QR codes.
async fn cmd_generate_product(
    config: Option<PathBuf>,
    title: Option<String>,
    price: Option<f64>,
    retries: u32,
    records: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let workflow = WorkflowConfig::default().call_timeout(config.timeout);
    let options = populate_options(title, price, workflow);
    let shop = config.shop.clone();

    let client = AdminClient::with_config(config).context("Invalid Admin API configuration")?;
    let records = load_records(records.as_deref())?;
    let action = GenerateProductAction::new(Arc::new(client), Arc::new(records), shop)
        .with_options(options);

    let outcome = run_with_retry(&RetryPolicy::new(retries, 1000, 10_000), || action.submit())
        .await
        .context("Failed to generate product")?;

    info!(
        product = %outcome.result.created().id(),
        records = outcome.records.len(),
        "Generate product finished"
    );

    let data = outcome.to_json().context("Failed to encode result")?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    println!("{} (#{})", outcome.notice, outcome.product_number());
    Ok(())
}

/// Fetch the shop name to check credentials and endpoint.
async fn cmd_shop_name(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let client = AdminClient::with_config(config).context("Invalid Admin API configuration")?;

    let name = client
        .shop_name()
        .await
        .with_context(|| format!("Failed to reach {}", client.endpoint()))?;

    println!("{name}");
    Ok(())
}

/// Config from `path` when given, otherwise from `QR_ADMIN_*` variables.
pub fn load_config(path: Option<&Path>) -> Result<AdminApiConfig> {
    match path {
        Some(path) => AdminApiConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AdminApiConfig::from_env()),
    }
}

/// QR code records from a JSON file, or none.
pub fn load_records(path: Option<&Path>) -> Result<StaticRecordSource> {
    let Some(path) = path else {
        return Ok(StaticRecordSource::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    StaticRecordSource::from_json(&content)
        .with_context(|| format!("Failed to parse records in {}", path.display()))
}

/// Fixed title/price when given, random otherwise.
#[must_use]
pub fn populate_options(
    title: Option<String>,
    price: Option<f64>,
    workflow: WorkflowConfig,
) -> PopulateOptions {
    PopulateOptions {
        title: title.map_or(TitlePolicy::RandomColor, TitlePolicy::Fixed),
        price: price.map_or(PricePolicy::Random, PricePolicy::Fixed),
        workflow,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use qr_admin_core::RecordSource;
    use tempfile::NamedTempFile;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_populate_options_prefers_given_values() {
        let options = populate_options(
            Some("Blue Snowboard".to_string()),
            Some(3.5),
            WorkflowConfig::default(),
        );

        assert_eq!(options.title, TitlePolicy::Fixed("Blue Snowboard".to_string()));
        assert_eq!(options.price, PricePolicy::Fixed(3.5));
    }

    #[test]
    fn test_populate_options_defaults_to_random() {
        let options = populate_options(None, None, WorkflowConfig::default());

        assert_eq!(options.title, TitlePolicy::RandomColor);
        assert_eq!(options.price, PricePolicy::Random);
    }

    #[test]
    fn test_load_config_from_toml_file() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "shop = \"demo.myshopify.com\"")?;
        writeln!(file, "access_token = \"shpat_file\"")?;
        writeln!(file, "timeout = 7")?;

        let config = load_config(Some(file.path()))?;

        assert_eq!(config.shop, "demo.myshopify.com");
        assert_eq!(config.access_token, "shpat_file");
        assert_eq!(config.timeout, Duration::from_secs(7));
        Ok(())
    }

    #[test]
    fn test_load_config_reports_path_on_failure() {
        let missing = Path::new("/nonexistent/qr-admin.toml");

        let error = load_config(Some(missing)).map(|_| ());

        assert!(error.is_err_and(|e| e.to_string().contains("/nonexistent/qr-admin.toml")));
    }

    #[tokio::test]
    async fn test_load_records_from_json_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"[{{
                "id": 1,
                "title": "Front window",
                "shop": "demo.myshopify.com",
                "productId": "gid://shopify/Product/1",
                "destination": "product",
                "scans": 4,
                "createdAt": "2024-01-01T00:00:00Z"
            }}]"#
        )?;

        let source = load_records(Some(file.path()))?;
        let records = source.list("demo.myshopify.com").await?;

        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(|r| r.title.as_str()), Some("Front window"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_records_without_path_is_empty() -> TestResult {
        let source = load_records(None)?;
        assert!(source.list("demo.myshopify.com").await?.is_empty());
        Ok(())
    }
}
