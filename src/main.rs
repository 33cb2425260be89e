use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use catalogd::config::Options;
use catalogd::server::Server;
use catalogd::store::{LoadOutcome, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting catalogd - file-backed product catalog");
    info!("Storage file: {}", options.storage.display());

    let mut store = ProductStore::new(&options.storage);
    match store.load().await {
        LoadOutcome::Loaded(count) => info!("Loaded {} products", count),
        // Startup continues on the empty in-memory list; handlers reload
        // from disk on every request anyway.
        _ => warn!("Could not load the storage file at startup"),
    }

    let server = Server::bind(&options.listen, store)
        .await
        .with_context(|| format!("failed to bind {}", options.listen))?;
    info!("Server listening on: {}", server.local_addr());

    // Serve until the process is stopped
    server.run().await.context("server terminated")?;
    Ok(())
}
