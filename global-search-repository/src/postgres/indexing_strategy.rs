//! PostgreSQL indexing strategy.
//!
//! Persists index items into a `search_index_items` table with upsert
//! semantics, so a re-indexing pass supersedes earlier records for the same
//! document key.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexingStrategy;
use crate::postgres::is_valid_identifier;
use global_search_shared::SearchIndexItem;

/// Default table backing the index.
const DEFAULT_TABLE: &str = "search_index_items";

/// PostgreSQL implementation of [`SearchIndexingStrategy`].
pub struct PostgresIndexingStrategy {
    pool: PgPool,
    table: String,
}

impl PostgresIndexingStrategy {
    /// Create a strategy writing to the default `search_index_items` table.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Create a strategy writing to a custom table.
    pub fn with_table(pool: PgPool, table: impl Into<String>) -> Result<Self, SearchIndexError> {
        let table = table.into();
        if !is_valid_identifier(&table) {
            return Err(SearchIndexError::initialization(format!(
                "invalid index table name: {}",
                table
            )));
        }
        Ok(Self { pool, table })
    }

    /// Ensure the backing table exists, creating it if necessary.
    ///
    /// Call this during application startup before performing item
    /// operations.
    pub async fn ensure_table_exists(&self) -> Result<(), SearchIndexError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                document_id   TEXT PRIMARY KEY,
                title         TEXT NOT NULL,
                item_type     TEXT NOT NULL,
                subtitle      TEXT,
                description   TEXT,
                thumbnail_url TEXT,
                metadata      JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                entity_id     TEXT,
                entity_name   TEXT,
                last_modified TIMESTAMPTZ NOT NULL,
                indexed_at    TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            self.table
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| SearchIndexError::initialization(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SearchIndexingStrategy for PostgresIndexingStrategy {
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn persist(&self, items: &[SearchIndexItem]) -> Result<(), SearchIndexError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} (document_id, title, item_type, subtitle, description, \
             thumbnail_url, metadata, entity_id, entity_name, last_modified)",
            self.table
        ));

        query_builder.push_values(items, |mut b, item| {
            let metadata = serde_json::to_value(&item.metadata)
                .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
            b.push_bind(item.document_id())
                .push_bind(item.title.clone())
                .push_bind(item.item_type.as_str())
                .push_bind(item.subtitle.clone())
                .push_bind(item.description.clone())
                .push_bind(item.thumbnail_url.clone())
                .push_bind(metadata)
                .push_bind(item.entity_id.clone())
                .push_bind(item.entity_name.clone())
                .push_bind(item.last_modified);
        });

        query_builder.push(
            " ON CONFLICT (document_id) DO UPDATE SET \
             title = EXCLUDED.title, \
             item_type = EXCLUDED.item_type, \
             subtitle = EXCLUDED.subtitle, \
             description = EXCLUDED.description, \
             thumbnail_url = EXCLUDED.thumbnail_url, \
             metadata = EXCLUDED.metadata, \
             entity_id = EXCLUDED.entity_id, \
             entity_name = EXCLUDED.entity_name, \
             last_modified = EXCLUDED.last_modified, \
             indexed_at = now()",
        );

        query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| SearchIndexError::persist(e.to_string()))?;

        debug!(item_count = items.len(), "Persisted index items");
        Ok(())
    }

    async fn remove(&self, document_id: &str) -> Result<(), SearchIndexError> {
        let sql = format!("DELETE FROM {} WHERE document_id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(document_id)
            .execute(&self.pool)
            .await
            .map_err(|e| SearchIndexError::remove(e.to_string()))?;

        // Removing a key that was never persisted is fine.
        debug!(
            document_id = %document_id,
            rows_affected = result.rows_affected(),
            "Removed index item"
        );
        Ok(())
    }
}
