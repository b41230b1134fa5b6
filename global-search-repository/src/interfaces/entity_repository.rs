//! Entity repository trait definition.

use async_trait::async_trait;

use crate::errors::EntityRepositoryError;
use global_search_shared::EntityRecord;

/// Row access for a single registered entity type.
///
/// Exact query semantics (pagination consistency, isolation) are delegated to
/// the implementation; the indexing pipeline only relies on `count` being
/// consistent enough with `find_page` for a batch walk, which is acceptable
/// because indexing is idempotent and re-run on a schedule.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Total number of rows for this entity type.
    async fn count(&self) -> Result<u64, EntityRepositoryError>;

    /// Fetch a page of rows in a stable order.
    async fn find_page(&self, skip: u64, take: u64)
        -> Result<Vec<EntityRecord>, EntityRepositoryError>;

    /// Look up a single row by id. Returns `None` when the row is missing,
    /// which the pipeline treats as a deletion signal.
    async fn find_by_id(&self, id: &str) -> Result<Option<EntityRecord>, EntityRepositoryError>;
}
