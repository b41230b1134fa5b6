//! Global Search Indexer Main Entry Point
//!
//! This is the main binary for the global search indexer. It walks the
//! registered entity types on a schedule and feeds the configured indexing
//! strategy through a background job queue.

use dotenv::dotenv;
use global_search_indexer::{Dependencies, IndexingError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("global_search_indexer=info,global_search_repository=info"));

    let json_logs = env::var("LOG_JSON").is_ok();

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "global-search-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "global-search-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting global search indexer");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let Dependencies { task, worker } = deps;

    match task.run().await {
        Ok(()) => {
            info!("Scheduled index task stopped");
        }
        Err(e) => {
            error!(error = %e, "Scheduled index task failed");
            return Err(e.into());
        }
    }

    // Dropping the task releases the last queue handle; the worker drains
    // whatever is still enqueued and exits.
    drop(task);
    worker.join().await;

    info!("Global search indexer shutdown complete");
    Ok(())
}
