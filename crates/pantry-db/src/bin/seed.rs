//! # Seed Data Generator
//!
//! Populates the products table with test data for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default)
//! cargo run -p pantry-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p pantry-db --bin seed -- --count 500 --db ./data/pantry.db
//!
//! # Print every stored product as a JSON line afterwards
//! cargo run -p pantry-db --bin seed -- --json
//! ```
//!
//! Without `--db`, the path comes from `PANTRY_DB_PATH` (see `DbConfig::from_env`).

use std::env;
use std::time::Instant;

use chrono::{Days, NaiveDate};
use futures::TryStreamExt;
use pantry_core::Product;
use pantry_db::{Database, DbConfig, DbError, PRODUCTS_DDL_FILE_NAME};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Product names for realistic test data
const NAMES: &[&str] = &[
    "Whole Milk",
    "Greek Yogurt",
    "Cheddar Cheese",
    "Butter",
    "Sourdough Bread",
    "Rolled Oats",
    "Basmati Rice",
    "Olive Oil",
    "Tomato Passata",
    "Orange Juice",
];

/// Producers cycled across generated products
const PRODUCERS: &[&str] = &["Green Valley", "Hill Farm", "Old Mill", "Sunny Groves"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut db_path: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--count" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse().unwrap_or(count);
                    i += 1;
                }
            }
            "-d" | "--db" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = Some(value.clone());
                    i += 1;
                }
            }
            "--json" => json = true,
            "-h" | "--help" => {
                println!("Pantry Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 100)");
                println!("  -d, --db <PATH>    Database file path (default: $PANTRY_DB_PATH or ./pantry.db)");
                println!("      --json         Print stored products as JSON lines");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = path.into();
    }

    let db = Database::new(config).await?;

    match db.schema().init_with(PRODUCTS_DDL_FILE_NAME).await {
        Ok(()) => info!("Created products table"),
        Err(DbError::SchemaFailed(reason)) => info!(%reason, "Keeping existing products table"),
        Err(e) => return Err(e.into()),
    }

    let products = db.products();
    let start = Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let mut product = generate_product(seed);

        if let Err(e) = products.save(&mut product).await {
            warn!(name = %product.name, error = %e, "Failed to insert product");
            continue;
        }

        generated += 1;
    }

    info!(
        generated,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Products generated"
    );

    let mut stream = products.stream_all();
    let mut stored = 0usize;
    while let Some(product) = stream.try_next().await? {
        if json {
            println!("{}", serde_json::to_string(&product)?);
        }
        stored += 1;
    }

    info!(stored, "Seed complete");
    db.close().await;

    Ok(())
}

/// Generates a single product with deterministic data.
fn generate_product(seed: usize) -> Product {
    let name = format!("{} #{}", NAMES[seed % NAMES.len()], seed);
    let producer = PRODUCERS[seed % PRODUCERS.len()];

    // $0.99 - $19.98
    let price = Decimal::new(99 + ((seed as i64 * 37) % 1900), 2);

    let base = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap_or_default();
    let expiration_date = base
        .checked_add_days(Days::new((seed % 365) as u64))
        .unwrap_or(base);

    Product::new(name, producer, price, expiration_date)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO level, sqlx warnings only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pantry_db=info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
