//! propsearch - download and browse UK property reference data.
//!
//! Hydrates every dataset store from the local cache, refreshes them all
//! from the API concurrently, then prints what is available.

mod args;
mod progress;
mod summary;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use propsearch_core::{ApiClient, CacheManager, Config, Persistence, Stores};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::Args;

/// Initialize the tracing subscriber for logging
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}\n\n{}", msg, args::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", args::USAGE);
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(args.log_file.as_deref())?;
    info!("propsearch starting");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    if args.save_config {
        config.save().context("Failed to save config")?;
        println!("Config saved");
        return Ok(());
    }

    let client = ApiClient::new(config.base_url(), config.request_timeout())?;
    info!(base_url = %client.base_url(), "API client configured");

    let persistence: Option<Arc<dyn Persistence>> =
        match config.cache_dir().and_then(CacheManager::new) {
            Ok(cache) => {
                if args.clear_cache {
                    cache.clear()?;
                    info!(dir = %cache.cache_dir().display(), "Cache cleared");
                }
                Some(Arc::new(cache) as Arc<dyn Persistence>)
            }
            Err(e) => {
                warn!(error = %e, "Cache unavailable, data will not persist");
                None
            }
        };

    let stores = Stores::new(&client, persistence, config.persist);
    let hydrated = stores.hydrate_all();
    info!(count = hydrated.len(), "Loaded cached datasets");

    if args.offline {
        info!("Offline mode, skipping download");
    } else if let Some(id) = args.refresh {
        let coordinator = stores.coordinator();
        eprintln!("Downloading {}...", id.display_name());
        if let Err(e) = coordinator.reinit(id).await {
            eprintln!("  {}", e);
        }
    } else {
        let coordinator = stores.coordinator();
        info!(datasets = ?coordinator.datasets(), "Refreshing datasets");
        let indicator = progress::spawn(coordinator.subscribe());
        let report = coordinator.run().await;
        if let Err(e) = indicator.await {
            warn!(error = %e, "Progress indicator task failed");
        }
        progress::print_failures(&report);
    }

    summary::print(&stores, args.lines);

    info!("propsearch shutting down");
    Ok(())
}
