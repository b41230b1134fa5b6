//! Pipeline options.
//!
//! An explicit configuration struct passed at construction time. There is no
//! global mutable options object; everything the pipeline needs travels
//! through this struct.

use std::sync::Arc;
use std::time::Duration;

use global_search_repository::{NoopIndexingStrategy, SearchIndexingStrategy};
use global_search_shared::RequestContext;

use crate::mappers::EntityDataMapper;

/// Options for the global search pipeline.
pub struct GlobalSearchConfig {
    /// Strategy that persists and removes index records.
    pub indexing_strategy: Arc<dyn SearchIndexingStrategy>,
    /// Additional entity data mappers, keyed by entity type name. These
    /// override the built-in mappers.
    pub entity_data_mappers: Vec<(String, Arc<dyn EntityDataMapper>)>,
    /// Rows per processing page.
    pub batch_size: usize,
    /// Time between scheduled reindex runs.
    pub index_interval: Duration,
    /// Capacity of the job queue channel.
    pub queue_capacity: usize,
    /// Context captured for scheduled runs.
    pub ctx: RequestContext,
}

impl GlobalSearchConfig {
    /// Options with the given strategy and defaults for everything else.
    pub fn new(indexing_strategy: Arc<dyn SearchIndexingStrategy>) -> Self {
        Self {
            indexing_strategy,
            entity_data_mappers: Vec::new(),
            batch_size: 100,
            index_interval: Duration::from_secs(24 * 60 * 60),
            queue_capacity: 100,
            ctx: RequestContext::default(),
        }
    }
}

impl Default for GlobalSearchConfig {
    fn default() -> Self {
        Self::new(Arc::new(NoopIndexingStrategy::new()))
    }
}
