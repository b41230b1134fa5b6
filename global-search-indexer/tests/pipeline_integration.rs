//! Integration tests for the indexing pipeline.
//!
//! These tests wire the real service, queue, and processor together with
//! in-memory dependencies (entity repositories and indexing strategy) to
//! ensure reliable testing.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::{sleep, timeout};

use global_search_indexer::config::{Dependencies, GlobalSearchConfig};
use global_search_indexer::mappers::EntityDataMapper;
use global_search_repository::{
    EntityMetadata, EntityRegistry, EntityRepository, EntityRepositoryError, SearchIndexError,
    SearchIndexingStrategy,
};
use global_search_shared::{EntityRecord, IndexItemType, SearchIndexItem};

// Mock entity repository serving generated rows
struct StaticRepository {
    rows: Vec<EntityRecord>,
}

impl StaticRepository {
    fn new(entity_name: &str, count: usize) -> Self {
        let rows = (1..=count)
            .map(|i| {
                let mut record = EntityRecord::new(entity_name, i.to_string(), Utc::now());
                record
                    .fields
                    .insert("name".to_string(), serde_json::json!(format!("Row {}", i)));
                record
            })
            .collect();
        Self { rows }
    }
}

#[async_trait]
impl EntityRepository for StaticRepository {
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

    async fn find_by_id(&self, id: &str) -> Result<Option<EntityRecord>, EntityRepositoryError> {
        Ok(self.rows.iter().find(|r| r.id == id).cloned())
    }
}

// Mock strategy recording every persisted item
#[derive(Default)]
struct RecordingStrategy {
    items: Mutex<Vec<SearchIndexItem>>,
}

impl RecordingStrategy {
    fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchIndexingStrategy for RecordingStrategy {
    async fn persist(&self, items: &[SearchIndexItem]) -> Result<(), SearchIndexError> {
        self.items.lock().unwrap().extend_from_slice(items);
        Ok(())
    }

    async fn remove(&self, _document_id: &str) -> Result<(), SearchIndexError> {
        Ok(())
    }
}

struct UppercaseMapper;

impl EntityDataMapper for UppercaseMapper {
    fn map(&self, record: &EntityRecord) -> SearchIndexItem {
        let title = record
            .string_field("name")
            .map(|n| n.to_uppercase())
            .unwrap_or_else(|| record.id.clone());
        SearchIndexItem::for_entity(
            record.entity_name.clone(),
            record.id.clone(),
            title,
            IndexItemType::Entity,
            record.updated_at,
        )
    }
}

fn build_registry(types: &[(&str, usize)]) -> Arc<EntityRegistry> {
    let mut registry = EntityRegistry::new();
    for (name, count) in types {
        registry.register(
            EntityMetadata::new(*name, name.to_lowercase()),
            Arc::new(StaticRepository::new(name, *count)),
        );
    }
    Arc::new(registry)
}

async fn wait_for_items(strategy: &RecordingStrategy, expected: usize) {
    timeout(Duration::from_secs(2), async {
        while strategy.item_count() < expected {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("indexing did not finish in time");
}

#[tokio::test]
async fn test_scheduled_run_indexes_all_registered_types() {
    let strategy = Arc::new(RecordingStrategy::default());
    let registry = build_registry(&[("Product", 7), ("Collection", 3)]);

    let mut config = GlobalSearchConfig::new(strategy.clone());
    config.batch_size = 3;
    config.index_interval = Duration::from_secs(3600);

    let Dependencies { task, worker } = Dependencies::from_config(config, registry);
    let task = Arc::new(task);

    let runner = {
        let task = task.clone();
        tokio::spawn(async move { task.run().await })
    };

    // The first tick fires immediately and enqueues one job per type.
    wait_for_items(&strategy, 10).await;

    let items = strategy.items.lock().unwrap();
    assert_eq!(items.len(), 10);
    assert!(items
        .iter()
        .any(|i| i.document_id() == "entity_Product_7"));
    assert!(items
        .iter()
        .any(|i| i.document_id() == "entity_Collection_3"));
    drop(items);

    task.shutdown();
    runner.await.unwrap().unwrap();
    worker.shutdown();
    worker.join().await;
}

#[tokio::test]
async fn test_configured_mapper_is_used_by_jobs() {
    let strategy = Arc::new(RecordingStrategy::default());
    let registry = build_registry(&[("Product", 2)]);

    let mut config = GlobalSearchConfig::new(strategy.clone());
    config.entity_data_mappers = vec![("Product".to_string(), Arc::new(UppercaseMapper))];
    config.index_interval = Duration::from_secs(3600);

    let Dependencies { task, worker } = Dependencies::from_config(config, registry);
    let task = Arc::new(task);
    let runner = {
        let task = task.clone();
        tokio::spawn(async move { task.run().await })
    };

    wait_for_items(&strategy, 2).await;

    let items = strategy.items.lock().unwrap();
    assert_eq!(items[0].title, "ROW 1");
    assert_eq!(items[1].title, "ROW 2");
    drop(items);

    task.shutdown();
    runner.await.unwrap().unwrap();
    worker.shutdown();
    worker.join().await;
}
