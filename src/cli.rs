//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qr_admin_workflow::validate_price;

/// qr-admin - QR code admin tooling
#[derive(Parser, Debug)]
#[command(name = "qr-admin")]
#[command(version)]
#[command(about = "Create demo products through the store Admin GraphQL API")]
#[command(
    long_about = "qr-admin creates a demo product, prices its first variant, and lists the shop's QR codes. Connection settings come from a config file or QR_ADMIN_* environment variables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a demo product and set a price on its first variant
    GenerateProduct {
        /// Config file (TOML or JSON); falls back to environment variables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Product title (default: random "<color> Snowboard")
        #[arg(short, long)]
        title: Option<String>,

        /// Variant price (default: random below 100)
        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,

        /// Retries on create-phase transport failures
        #[arg(short, long, default_value_t = 0)]
        retries: u32,

        /// JSON file of QR code records to list after creation
        #[arg(long)]
        records: Option<PathBuf>,
    },

    /// Check the connection by fetching the shop name
    ShopName {
        /// Config file (TOML or JSON); falls back to environment variables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse a `--price` value, rejecting amounts the API would refuse.
fn parse_price(value: &str) -> Result<f64, String> {
    let amount: f64 = value.parse().map_err(|e| format!("{e}"))?;
    validate_price(amount).map_err(|e| e.to_string())
}
