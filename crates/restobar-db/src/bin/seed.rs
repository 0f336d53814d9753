//! # Seed Tool
//!
//! Writes the default menu and floor into a database file.
//!
//! ## Usage
//! ```bash
//! # Default path from RESTOBAR_DB_PATH or ./restobar.db
//! cargo run -p restobar-db --bin seed
//!
//! # Custom file and floor size
//! cargo run -p restobar-db --bin seed -- --db ./data/bar.db --tables 12
//!
//! # Put the default menu back over an edited one
//! cargo run -p restobar-db --bin seed -- --reset-menu
//! ```
//!
//! Products and tables already stored are left alone unless a reset flag
//! asks otherwise, so running it twice is harmless. Orders are never
//! written: paid orders are the sales history.

use std::env;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use restobar_db::{Database, DbConfig, Restaurant, RestobarConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = RestobarConfig::from_env();
    let mut reset_menu = false;
    let mut reset_floor = false;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--tables" | "-t" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u32>() {
                        Ok(n) if n > 0 => config.table_count = n,
                        _ => warn!(value = %args[i + 1], "Ignoring invalid table count"),
                    }
                    i += 1;
                }
            }
            "--reset-menu" => reset_menu = true,
            "--reset-floor" => reset_floor = true,
            "--help" | "-h" => {
                println!("Restobar Seed Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./restobar.db)");
                println!("  -t, --tables <N>     Number of tables (default: 20)");
                println!("      --reset-menu     Overwrite the stored menu with the defaults");
                println!("      --reset-floor    Overwrite the stored floor with the defaults");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    println!("🌱 Restobar Seed Tool");
    println!("=====================");
    println!("Database: {}", config.database_path.display());
    println!("Tables:   {}", config.table_count);
    println!();

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let restaurant = Restaurant::new(db, config);

    let report = restaurant.install_defaults(reset_menu, reset_floor).await?;

    if report.menu_written {
        println!("✓ Default menu written");
    } else {
        println!("⚠ Menu already stored, leaving it as is");
    }
    if report.floor_written {
        println!("✓ {} tables written", restaurant.config().table_count);
    } else {
        println!("⚠ Floor already stored, leaving it as is");
    }
    println!("✓ {} stored orders kept", report.orders_kept);

    println!();
    println!("Menu:");
    for product in restaurant.products().list().await? {
        println!(
            "  {:>3}  {:<20} {:>10}  {}",
            product.id,
            product.name,
            restaurant.config().format_money(product.price),
            product.category
        );
    }

    let totals = restaurant.paid_totals().await?;
    println!();
    println!(
        "Paid sales so far: {}",
        restaurant.config().format_money(totals.general)
    );

    Ok(())
}

/// `RUST_LOG` wins; otherwise info for everything, debug for restobar.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,restobar_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
