//! Standalone connectivity self-test: verifies the configured data store is
//! reachable, the catalog tables exist, and reports their row counts.
//!
//! Not part of the serving path. Exits 0 when everything checks out, 1
//! otherwise.

use std::process::ExitCode;

use athletic_trainer::config::Config;
use athletic_trainer::store::{self, SpannerStore, TABLES};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => {
            tracing::info!("All store checks passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Store check failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.log_startup();

    tracing::info!("Testing connection...");
    let store = SpannerStore::from_config(&config).await?;

    tracing::info!("Testing query...");
    store.health_check().await?;
    tracing::info!("Query succeeded");

    tracing::info!("Checking tables...");
    let missing = store::missing_tables(&config).await?;
    if !missing.is_empty() {
        anyhow::bail!(
            "missing required tables: {}. Please import the seed schema.",
            missing.join(", ")
        );
    }
    tracing::info!("All required tables present");

    for table in TABLES {
        let count = store.count_rows(table).await?;
        tracing::info!("  {}: {} records", table, count);
    }

    Ok(())
}
