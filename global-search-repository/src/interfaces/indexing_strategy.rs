//! Search indexing strategy trait and the default no-op implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SearchIndexError;
use global_search_shared::SearchIndexItem;

/// Abstracts the backing store for search index items.
///
/// This is the seam at which an external search engine would be integrated.
/// The pipeline makes no assumption about the backing technology beyond the
/// two operations here: persisting a batch of items and removing one item by
/// its logical document key.
///
/// Implementations are injected into the data processor, which enables easy
/// testing with mock implementations.
#[async_trait]
pub trait SearchIndexingStrategy: Send + Sync {
    /// Persist a batch of index items.
    ///
    /// Entity-derived items supersede any previously persisted item with the
    /// same document key ([`SearchIndexItem::document_id`]), so implementations
    /// should treat persistence as an upsert.
    async fn persist(&self, items: &[SearchIndexItem]) -> Result<(), SearchIndexError>;

    /// Remove the item with the given logical document key.
    ///
    /// Removing a key that was never persisted is not an error.
    async fn remove(&self, document_id: &str) -> Result<(), SearchIndexError>;
}

/// Default strategy: accepts items and discards them.
///
/// This is an intentional placeholder until a real backing index is plugged
/// in. Accepted and removed counts are tracked so the pipeline remains
/// observable even without a real store.
#[derive(Debug, Default)]
pub struct NoopIndexingStrategy {
    accepted: AtomicU64,
    removed: AtomicU64,
}

impl NoopIndexingStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items accepted since creation.
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Total number of removals accepted since creation.
    pub fn removed_count(&self) -> u64 {
        self.removed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SearchIndexingStrategy for NoopIndexingStrategy {
    async fn persist(&self, items: &[SearchIndexItem]) -> Result<(), SearchIndexError> {
        self.accepted.fetch_add(items.len() as u64, Ordering::Relaxed);
        debug!(item_count = items.len(), "No-op strategy accepted items");
        Ok(())
    }

    async fn remove(&self, document_id: &str) -> Result<(), SearchIndexError> {
        self.removed.fetch_add(1, Ordering::Relaxed);
        debug!(document_id = %document_id, "No-op strategy accepted removal");
        Ok(())
    }
}
