//! # Seed Data Generator
//!
//! Populates a data directory with demo products and login accounts for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default directory (./data)
//! cargo run -p shoptrack-store --bin seed
//!
//! # Specify a data directory
//! cargo run -p shoptrack-store --bin seed -- --data ./demo-data
//! ```
//!
//! ## Generated Data
//! - A small catalogue of shelf products across a few categories, with
//!   cost/selling prices and opening stock
//! - Two accounts: a manager (`omar` / `manager`) and a till staff
//!   member (`amira` / `staff`)
//!
//! Seeding is skipped when the directory already holds products, so it is
//! safe to run repeatedly.

use std::env;

use shoptrack_core::storage::Storage;
use shoptrack_core::{Money, Product, Role, UserAccount};
use shoptrack_store::JsonStore;

/// Demo catalogue: (id, name, category, cost cents, sell cents, stock).
const CATALOGUE: &[(&str, &str, &str, i64, i64, i64)] = &[
    ("A101", "Green Tea 500g", "Beverages", 500, 1250, 40),
    ("A102", "Black Tea 500g", "Beverages", 450, 1150, 50),
    ("A103", "Ground Coffee 250g", "Beverages", 800, 1699, 25),
    ("B201", "Basmati Rice 5kg", "Staples", 1400, 2250, 30),
    ("B202", "Whole Wheat Flour 2kg", "Staples", 350, 650, 45),
    ("B203", "Sunflower Oil 1L", "Staples", 600, 999, 35),
    ("C301", "Ceylon Cinnamon 100g", "Spices", 300, 799, 20),
    ("C302", "Turmeric Powder 200g", "Spices", 250, 599, 28),
    ("C303", "Black Pepper 100g", "Spices", 400, 899, 22),
    ("D401", "Dish Soap 750ml", "Household", 180, 425, 60),
    ("D402", "Laundry Powder 1kg", "Household", 450, 950, 33),
    ("E501", "Chocolate Biscuits", "Snacks", 120, 299, 80),
    ("E502", "Salted Peanuts 200g", "Snacks", 150, 375, 70),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut data_dir = String::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ShopTrack Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <PATH>  Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("ShopTrack Seed Data Generator");
    println!("=============================");
    println!("Data directory: {data_dir}");
    println!();

    let mut store = JsonStore::open(&data_dir)?;

    // Check existing data
    let existing = store.load_products()?;
    if !existing.is_empty() {
        println!("Directory already has {} products.", existing.len());
        println!("Skipping seed to avoid clobbering live data.");
        println!("Delete the data files to regenerate.");
        return Ok(());
    }

    let products: Vec<Product> = CATALOGUE
        .iter()
        .map(|(id, name, category, cost, sell, stock)| {
            Product::new(
                *id,
                *name,
                *category,
                Money::from_cents(*cost),
                Money::from_cents(*sell),
                *stock,
            )
        })
        .collect();

    let users = vec![
        UserAccount {
            username: "omar".to_string(),
            password: "manager".to_string(),
            role: Role::Manager,
        },
        UserAccount {
            username: "amira".to_string(),
            password: "staff".to_string(),
            role: Role::Staff,
        },
    ];

    store.save_products(&products)?;
    store.save_users(&users)?;

    println!("Seeded {} products and {} accounts.", products.len(), users.len());
    println!("Login with omar/manager (manager) or amira/staff (staff).");

    Ok(())
}
