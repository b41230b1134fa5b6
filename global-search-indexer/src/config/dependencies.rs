//! Dependency initialization and wiring for the indexer.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::time::sleep;
use tracing::{info, warn};

use global_search_repository::{
    EntityMetadata, EntityRegistry, NoopIndexingStrategy, PgEntityRepository,
    PostgresIndexingStrategy, SearchIndexingStrategy,
};
use global_search_shared::RequestContext;

use crate::config::GlobalSearchConfig;
use crate::mappers::MapperRegistry;
use crate::processor::{DataProcessor, ProcessorConfig};
use crate::queue::{InMemoryJobQueue, QueueWorker};
use crate::service::SearchIndexService;
use crate::task::{ScheduledIndexTask, TaskConfig};
use crate::IndexingError;

/// Default database URL.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/storefront";

/// Default entity registrations: `Name:table` pairs.
const DEFAULT_INDEX_ENTITIES: &str = "Product:product";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("DATABASE_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid DATABASE_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured scheduled task ready to run.
    pub task: ScheduledIndexTask,
    /// Handle to the queue worker, for graceful shutdown.
    pub worker: QueueWorker,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL URL (default: postgres://localhost:5432/storefront)
    /// - `DATABASE_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `DATABASE_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `INDEX_BACKEND`: "noop" or "postgres" (default: noop)
    /// - `INDEX_ENTITIES`: comma-separated `Name:table` pairs (default: Product:product)
    /// - `INDEX_BATCH_SIZE`: rows per processing page (default: 100)
    /// - `INDEX_INTERVAL_SECS`: seconds between reindex runs (default: 86400)
    /// - `QUEUE_CAPACITY`: job queue channel capacity (default: 100)
    /// - `CHANNEL_CODE` / `LANGUAGE_CODE`: indexing context (default: default / en)
    pub async fn new() -> Result<Self, IndexingError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("DATABASE_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);
        let backend = env::var("INDEX_BACKEND").unwrap_or_else(|_| "noop".to_string());

        info!(
            database_url = %database_url,
            connection_mode = ?connection_mode,
            backend = %backend,
            "Initializing dependencies"
        );

        let pool = Self::connect_to_database(
            &database_url,
            connection_mode,
            Duration::from_secs(retry_interval),
        )
        .await?;

        info!("Database connection established");

        let indexing_strategy: Arc<dyn SearchIndexingStrategy> =
            match backend.to_lowercase().as_str() {
                "postgres" => {
                    let strategy = PostgresIndexingStrategy::new(pool.clone());
                    strategy.ensure_table_exists().await.map_err(|e| {
                        IndexingError::config(format!("Failed to ensure index table exists: {}", e))
                    })?;
                    Arc::new(strategy)
                }
                _ => Arc::new(NoopIndexingStrategy::new()),
            };

        let entities =
            env::var("INDEX_ENTITIES").unwrap_or_else(|_| DEFAULT_INDEX_ENTITIES.to_string());
        let mut registry = EntityRegistry::new();
        for metadata in parse_entity_list(&entities) {
            let repository =
                PgEntityRepository::new(pool.clone(), metadata.clone()).map_err(|e| {
                    IndexingError::config(format!(
                        "Failed to create repository for {}: {}",
                        metadata.name, e
                    ))
                })?;
            registry.register(metadata, Arc::new(repository));
        }

        info!(entity_count = registry.len(), "Entity registry built");

        let mut config = GlobalSearchConfig::new(indexing_strategy);
        if let Some(batch_size) = env::var("INDEX_BATCH_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.batch_size = batch_size;
        }
        if let Some(secs) = env::var("INDEX_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.index_interval = Duration::from_secs(secs);
        }
        if let Some(capacity) = env::var("QUEUE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.queue_capacity = capacity;
        }
        config.ctx = RequestContext::new(
            env::var("CHANNEL_CODE").unwrap_or_else(|_| "default".to_string()),
            env::var("LANGUAGE_CODE").unwrap_or_else(|_| "en".to_string()),
        );

        Ok(Self::from_config(config, Arc::new(registry)))
    }

    /// Wire the pipeline from explicit options.
    pub fn from_config(config: GlobalSearchConfig, registry: Arc<EntityRegistry>) -> Self {
        let mappers = Arc::new(MapperRegistry::with_mappers(config.entity_data_mappers));

        let processor = Arc::new(DataProcessor::with_config(
            registry.clone(),
            mappers,
            config.indexing_strategy,
            ProcessorConfig {
                batch_size: config.batch_size,
            },
        ));

        let handler = SearchIndexService::job_handler(processor);
        let (queue, worker) =
            InMemoryJobQueue::start("global-search-index", config.queue_capacity, handler);

        let service = Arc::new(SearchIndexService::new(registry, Arc::new(queue)));
        let task = ScheduledIndexTask::new(
            service,
            TaskConfig {
                period: config.index_interval,
                ctx: config.ctx,
            },
        );

        Self { task, worker }
    }

    /// Connect to the database with retry logic based on connection mode.
    async fn connect_to_database(
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<PgPool, IndexingError> {
        loop {
            match PgPoolOptions::new().max_connections(5).connect(url).await {
                Ok(pool) => return Ok(pool),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(IndexingError::config(format!(
                            "Failed to connect to database: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            database_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to database, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}

/// Parse a comma-separated list of `Name:table` pairs.
///
/// Malformed entries are skipped with a warning. An entry without a table
/// uses the lowercased name as its table.
fn parse_entity_list(raw: &str) -> Vec<EntityMetadata> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|entry| match entry.split_once(':') {
            Some((name, table)) if !name.is_empty() && !table.is_empty() => {
                Some(EntityMetadata::new(name.trim(), table.trim()))
            }
            Some(_) => {
                warn!(entry = %entry, "Skipping malformed entity registration");
                None
            }
            None => Some(EntityMetadata::new(entry, entry.to_lowercase())),
        })
        .collect()
}
