//! Batch processing over registered entity types.
//!
//! The processor walks entity types in their registration order, maps rows
//! into search index items, and persists them through the configured
//! indexing strategy.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use global_search_repository::{EntityRegistry, RegisteredEntity, SearchIndexingStrategy};

use crate::errors::IndexError;
use crate::mappers::MapperRegistry;

/// Configuration for the data processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Number of rows fetched and persisted per page.
    pub batch_size: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Progress signal emitted per entity type processed within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    /// Entity type that was processed.
    pub entity_name: String,
    /// Number of rows handled for this type.
    pub processed: u64,
}

/// Outcome of processing a single entity by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The entity was found, mapped, and persisted.
    Indexed,
    /// The entity was missing; its index record was removed.
    Removed,
}

/// Walks registered entity types and feeds the indexing strategy.
pub struct DataProcessor {
    registry: Arc<EntityRegistry>,
    mappers: Arc<MapperRegistry>,
    strategy: Arc<dyn SearchIndexingStrategy>,
    config: ProcessorConfig,
}

impl DataProcessor {
    pub fn new(
        registry: Arc<EntityRegistry>,
        mappers: Arc<MapperRegistry>,
        strategy: Arc<dyn SearchIndexingStrategy>,
    ) -> Self {
        Self {
            registry,
            mappers,
            strategy,
            config: ProcessorConfig::default(),
        }
    }

    pub fn with_config(
        registry: Arc<EntityRegistry>,
        mappers: Arc<MapperRegistry>,
        strategy: Arc<dyn SearchIndexingStrategy>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            registry,
            mappers,
            strategy,
            config,
        }
    }

    /// Configured page size.
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Total row count across all registered entity types.
    ///
    /// A type whose repository fails to count is skipped with a warning, so
    /// one broken table never hides the others.
    pub async fn total_results(&self) -> u64 {
        let mut total = 0;
        for entry in self.registry.entries() {
            match entry.repository.count().await {
                Ok(count) => total += count,
                Err(e) => {
                    warn!(
                        entity_name = %entry.metadata.name,
                        error = %e,
                        "Failed to count entity type"
                    );
                }
            }
        }
        total
    }

    /// Process a window of `limit` rows starting at `skip`, where the offset
    /// runs across all registered entity types in registration order.
    ///
    /// The running skip is decremented by each type's total row count until
    /// it falls inside a type's range; from there, pages are fetched, mapped,
    /// and persisted. One progress signal is emitted per entity type that
    /// handled at least one row, and the summed processed count never exceeds
    /// `limit`.
    ///
    /// A mapping or persistence failure for one entity type is logged and
    /// skipped; the batch continues with the next type.
    #[instrument(skip(self))]
    pub async fn process_batch(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<BatchProgress>, IndexError> {
        let mut skip = skip;
        let mut remaining = limit;
        let mut progress = Vec::new();

        for entry in self.registry.entries() {
            if remaining == 0 {
                break;
            }

            let total = match entry.repository.count().await {
                Ok(total) => total,
                Err(e) => {
                    warn!(
                        entity_name = %entry.metadata.name,
                        error = %e,
                        "Failed to count entity type, skipping"
                    );
                    continue;
                }
            };

            if skip >= total {
                skip -= total;
                continue;
            }

            let take = remaining.min(total - skip);
            match self.index_window(entry, skip, take).await {
                Ok(processed) if processed > 0 => {
                    remaining = remaining.saturating_sub(processed);
                    progress.push(BatchProgress {
                        entity_name: entry.metadata.name.clone(),
                        processed,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        entity_name = %entry.metadata.name,
                        error = %e,
                        "Failed to index entity type, continuing with next"
                    );
                }
            }
            skip = 0;
        }

        debug!(
            signal_count = progress.len(),
            processed = limit - remaining,
            "Batch complete"
        );
        Ok(progress)
    }

    /// Index every row of one entity type, page by page.
    ///
    /// This is the unit of work a queue job performs.
    #[instrument(skip(self))]
    pub async fn process_entity(&self, entity_name: &str) -> Result<u64, IndexError> {
        let entry = self
            .registry
            .get(entity_name)
            .ok_or_else(|| IndexError::unknown_entity(entity_name))?;

        let page_size = self.config.batch_size as u64;
        let mut offset = 0;
        loop {
            let processed = self.index_window(entry, offset, page_size).await?;
            offset += processed;
            if processed < page_size {
                break;
            }
        }

        info!(entity_name = %entity_name, processed = offset, "Entity type indexed");
        Ok(offset)
    }

    /// Process a single entity by id.
    ///
    /// A missing row is treated as a deletion signal, not an error: the
    /// strategy is asked to remove the key `entity_{entity_name}_{id}`.
    #[instrument(skip(self))]
    pub async fn process_one(
        &self,
        entity_name: &str,
        id: &str,
    ) -> Result<ProcessOutcome, IndexError> {
        let entry = self
            .registry
            .get(entity_name)
            .ok_or_else(|| IndexError::unknown_entity(entity_name))?;

        match entry.repository.find_by_id(id).await? {
            Some(record) => {
                let item = self.mappers.map(&record);
                self.strategy.persist(std::slice::from_ref(&item)).await?;
                Ok(ProcessOutcome::Indexed)
            }
            None => {
                let document_id = format!("entity_{}_{}", entity_name, id);
                debug!(document_id = %document_id, "Entity missing, removing index record");
                self.strategy.remove(&document_id).await?;
                Ok(ProcessOutcome::Removed)
            }
        }
    }

    /// Fetch, map, and persist up to `take` rows of one entity type.
    async fn index_window(
        &self,
        entry: &RegisteredEntity,
        skip: u64,
        take: u64,
    ) -> Result<u64, IndexError> {
        let records = entry.repository.find_page(skip, take).await?;
        if records.is_empty() {
            return Ok(0);
        }

        let items: Vec<_> = records.iter().map(|r| self.mappers.map(r)).collect();
        self.strategy.persist(&items).await?;

        Ok(items.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use global_search_repository::{
        EntityMetadata, EntityRepository, EntityRepositoryError, SearchIndexError,
    };
    use global_search_shared::{EntityRecord, SearchIndexItem};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory repository serving a fixed set of rows.
    struct InMemoryRepository {
        rows: Vec<EntityRecord>,
    }

    impl InMemoryRepository {
        fn with_rows(entity_name: &str, count: usize) -> Self {
            let rows = (1..=count)
                .map(|i| EntityRecord::new(entity_name, i.to_string(), Utc::now()))
                .collect();
            Self { rows }
        }
    }

    #[async_trait]
    impl EntityRepository for InMemoryRepository {
        async fn count(&self) -> Result<u64, EntityRepositoryError> {
            Ok(self.rows.len() as u64)
        }

        async fn find_page(
            &self,
            skip: u64,
            take: u64,
        ) -> Result<Vec<EntityRecord>, EntityRepositoryError> {
            Ok(self
                .rows
                .iter()
                .skip(skip as usize)
                .take(take as usize)
                .cloned()
                .collect())
        }

        async fn find_by_id(
            &self,
            id: &str,
        ) -> Result<Option<EntityRecord>, EntityRepositoryError> {
            Ok(self.rows.iter().find(|r| r.id == id).cloned())
        }
    }

    /// Recording strategy; can be told to fail for one entity type.
    #[derive(Default)]
    struct MockStrategy {
        persisted: Mutex<Vec<SearchIndexItem>>,
        persist_calls: AtomicUsize,
        removed: Mutex<Vec<String>>,
        fail_for_entity: Option<String>,
    }

    impl MockStrategy {
        fn failing_for(entity_name: &str) -> Self {
            Self {
                fail_for_entity: Some(entity_name.to_string()),
                ..Self::default()
            }
        }

        fn persisted_ids(&self) -> Vec<String> {
            self.persisted
                .lock()
                .unwrap()
                .iter()
                .map(|i| i.document_id())
                .collect()
        }
    }

    #[async_trait]
    impl SearchIndexingStrategy for MockStrategy {
        async fn persist(&self, items: &[SearchIndexItem]) -> Result<(), SearchIndexError> {
            if let Some(fail_for) = &self.fail_for_entity {
                if items.iter().any(|i| i.entity_name.as_deref() == Some(fail_for)) {
                    return Err(SearchIndexError::persist("injected failure"));
                }
            }
            self.persist_calls.fetch_add(1, Ordering::SeqCst);
            self.persisted.lock().unwrap().extend_from_slice(items);
            Ok(())
        }

        async fn remove(&self, document_id: &str) -> Result<(), SearchIndexError> {
            self.removed.lock().unwrap().push(document_id.to_string());
            Ok(())
        }
    }

    fn build_processor(
        types: &[(&str, usize)],
        strategy: Arc<MockStrategy>,
    ) -> DataProcessor {
        let mut registry = EntityRegistry::new();
        for (name, count) in types {
            registry.register(
                EntityMetadata::new(*name, name.to_lowercase()),
                Arc::new(InMemoryRepository::with_rows(name, *count)),
            );
        }
        DataProcessor::with_config(
            Arc::new(registry),
            Arc::new(MapperRegistry::new()),
            strategy,
            ProcessorConfig { batch_size: 2 },
        )
    }

    #[tokio::test]
    async fn test_total_results_sums_all_types() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3), ("Collection", 2)], strategy);

        assert_eq!(processor.total_results().await, 5);
    }

    #[tokio::test]
    async fn test_process_batch_emits_one_signal_per_type() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3), ("Collection", 2)], strategy.clone());

        let progress = processor.process_batch(0, 5).await.unwrap();

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].entity_name, "Product");
        assert_eq!(progress[0].processed, 3);
        assert_eq!(progress[1].entity_name, "Collection");
        assert_eq!(progress[1].processed, 2);
        assert_eq!(strategy.persisted.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_process_batch_never_exceeds_limit() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3), ("Collection", 2)], strategy);

        let progress = processor.process_batch(0, 4).await.unwrap();

        let processed: u64 = progress.iter().map(|p| p.processed).sum();
        assert_eq!(processed, 4);
        assert_eq!(progress[1].processed, 1);
    }

    #[tokio::test]
    async fn test_process_batch_skip_crosses_type_boundary() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3), ("Collection", 2)], strategy.clone());

        // Skip past all products and the first collection row.
        let progress = processor.process_batch(4, 10).await.unwrap();

        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].entity_name, "Collection");
        assert_eq!(progress[0].processed, 1);
        assert_eq!(strategy.persisted_ids(), vec!["entity_Collection_2"]);
    }

    #[tokio::test]
    async fn test_process_batch_tolerates_failing_type() {
        let strategy = Arc::new(MockStrategy::failing_for("Product"));
        let processor = build_processor(&[("Product", 3), ("Collection", 2)], strategy.clone());

        let progress = processor.process_batch(0, 5).await.unwrap();

        // Product fails and is skipped; the batch continues with Collection.
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].entity_name, "Collection");
        assert_eq!(progress[0].processed, 2);
    }

    #[tokio::test]
    async fn test_process_entity_pages_through_all_rows() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 5)], strategy.clone());

        let processed = processor.process_entity("Product").await.unwrap();

        assert_eq!(processed, 5);
        // batch_size 2: pages of 2, 2, 1
        assert_eq!(strategy.persist_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_process_entity_unknown_type_is_an_error() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 1)], strategy);

        let result = processor.process_entity("Customer").await;
        assert!(matches!(result, Err(IndexError::UnknownEntity(_))));
    }

    #[tokio::test]
    async fn test_process_one_found_persists() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3)], strategy.clone());

        let outcome = processor.process_one("Product", "2").await.unwrap();

        assert_eq!(outcome, ProcessOutcome::Indexed);
        assert_eq!(strategy.persisted_ids(), vec!["entity_Product_2"]);
        assert!(strategy.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_one_missing_removes_by_stable_key() {
        let strategy = Arc::new(MockStrategy::default());
        let processor = build_processor(&[("Product", 3)], strategy.clone());

        let outcome = processor.process_one("Product", "99").await.unwrap();

        assert_eq!(outcome, ProcessOutcome::Removed);
        assert_eq!(
            *strategy.removed.lock().unwrap(),
            vec!["entity_Product_99".to_string()]
        );
        assert_eq!(strategy.persist_calls.load(Ordering::SeqCst), 0);
    }
}
