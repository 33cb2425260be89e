//! Seed the storage file with the demo cafeteria catalog.
//!
//! Exercises the store's programmatic write API, which the HTTP service
//! deliberately does not expose.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use catalogd::config::DEFAULT_STORAGE_PATH;
use catalogd::product::ProductDraft;
use catalogd::store::ProductStore;

/// Command line options for the seed driver
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed the product catalog with demo data")]
struct Options {
    /// Path of the JSON storage file
    #[arg(long, default_value = DEFAULT_STORAGE_PATH)]
    storage: PathBuf,
}

/// title, description, price, thumbnail, code, stock
const MENU: [(&str, &str, f64, &str, &str, u32); 10] = [
    ("Caffe Latte", "Espresso with steamed milk", 3.99, "latte.jpg", "LATTE001", 10),
    ("Cappuccino", "Espresso with frothed milk foam", 4.49, "cappuccino.jpg", "CAPPU001", 15),
    ("Espresso", "Concentrated straight shot", 2.99, "espresso.jpg", "ESP001", 20),
    ("Mocha", "Espresso with chocolate and milk", 4.99, "mocha.jpg", "MOCHA001", 12),
    ("Americano", "Espresso diluted with hot water", 3.49, "americano.jpg", "AMER001", 18),
    ("Frappe", "Iced blended coffee with syrup", 5.99, "frappe.jpg", "FRAPPE001", 8),
    ("Cafe con Leche", "Dark coffee with scalded milk", 3.79, "cafe-con-leche.jpg", "CAFELE001", 14),
    ("Macchiato", "Espresso marked with a dash of milk", 4.29, "macchiato.jpg", "MACCH001", 9),
    ("Ground Coffee", "House blend for brewing at home", 6.49, "ground-coffee.jpg", "CAFEMO001", 25),
    ("Decaf Coffee", "House blend without the caffeine", 3.99, "decaf.jpg", "CAFEDS001", 16),
];

#[tokio::main]
async fn main() {
    let options = Options::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut store = ProductStore::new(&options.storage);
    // A first run has no file yet; the store then starts empty.
    store.load().await;

    for (title, description, price, thumbnail, code, stock) in MENU {
        let id = store
            .add(ProductDraft {
                title: title.to_string(),
                description: description.to_string(),
                price,
                thumbnail: thumbnail.to_string(),
                code: code.to_string(),
                stock,
            })
            .await;
        info!("Seeded product {} ({})", id, code);
    }

    info!(
        "Seeded {} products into {}",
        store.all().len(),
        options.storage.display()
    );
}
