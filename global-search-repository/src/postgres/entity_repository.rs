//! PostgreSQL entity repository.
//!
//! A generic repository over a single named table. Rows are fetched as JSON
//! via `row_to_json`, so one implementation serves every registered entity
//! type without compile-time knowledge of its columns.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::errors::EntityRepositoryError;
use crate::interfaces::EntityRepository;
use crate::postgres::is_valid_identifier;
use crate::registry::EntityMetadata;
use global_search_shared::EntityRecord;

/// PostgreSQL implementation of [`EntityRepository`] for one entity type.
pub struct PgEntityRepository {
    pool: PgPool,
    metadata: EntityMetadata,
}

impl PgEntityRepository {
    /// Create a repository for the table named in `metadata`.
    pub fn new(pool: PgPool, metadata: EntityMetadata) -> Result<Self, EntityRepositoryError> {
        if !is_valid_identifier(&metadata.table) {
            return Err(EntityRepositoryError::invalid_table_name(&metadata.table));
        }
        Ok(Self { pool, metadata })
    }

    /// The metadata this repository serves.
    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }
}

#[async_trait]
impl EntityRepository for PgEntityRepository {
    async fn count(&self) -> Result<u64, EntityRepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.metadata.table);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn find_page(
        &self,
        skip: u64,
        take: u64,
    ) -> Result<Vec<EntityRecord>, EntityRepositoryError> {
        let sql = format!(
            "SELECT row_to_json(t) FROM {} t ORDER BY id OFFSET $1 LIMIT $2",
            self.metadata.table
        );
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(&sql)
            .bind(skip as i64)
            .bind(take as i64)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            entity_name = %self.metadata.name,
            skip,
            take,
            row_count = rows.len(),
            "Fetched entity page"
        );

        rows.into_iter()
            .map(|row| record_from_json(&self.metadata.name, row))
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EntityRecord>, EntityRepositoryError> {
        let sql = format!(
            "SELECT row_to_json(t) FROM {} t WHERE t.id::text = $1 LIMIT 1",
            self.metadata.table
        );
        let row: Option<serde_json::Value> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| record_from_json(&self.metadata.name, r))
            .transpose()
    }
}

/// Decode a `row_to_json` row into an [`EntityRecord`].
///
/// The `id` column is required. The last-modified timestamp is taken from
/// `updated_at`, falling back to `created_at`, falling back to now (rows
/// without any timestamp are still indexable at minimum fidelity).
pub fn record_from_json(
    entity_name: &str,
    row: serde_json::Value,
) -> Result<EntityRecord, EntityRepositoryError> {
    let serde_json::Value::Object(mut map) = row else {
        return Err(EntityRepositoryError::decode(format!(
            "expected a JSON object row for entity {}",
            entity_name
        )));
    };

    let id = match map.remove("id") {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        other => {
            return Err(EntityRepositoryError::decode(format!(
                "row for entity {} has no usable id column ({:?})",
                entity_name, other
            )));
        }
    };

    let updated_at = map
        .remove("updated_at")
        .or_else(|| map.get("created_at").cloned())
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    let mut record = EntityRecord::new(entity_name, id, updated_at);
    record.fields = map.into_iter().collect();
    Ok(record)
}

/// Parse a timestamp as serialized by `row_to_json`.
///
/// `timestamptz` columns serialize with an offset, plain `timestamp` columns
/// without one; both forms are accepted.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_json_with_numeric_id() {
        let row = json!({
            "id": 42,
            "name": "Chair",
            "enabled": true,
            "updated_at": "2025-04-01T10:30:00+00:00"
        });

        let record = record_from_json("Product", row).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.entity_name, "Product");
        assert_eq!(record.string_field("name"), Some("Chair"));
        assert_eq!(
            record.updated_at,
            DateTime::parse_from_rfc3339("2025-04-01T10:30:00+00:00").unwrap()
        );
        // id and updated_at are pulled out of the field map
        assert!(!record.fields.contains_key("id"));
        assert!(!record.fields.contains_key("updated_at"));
    }

    #[test]
    fn test_record_from_json_with_string_id_and_naive_timestamp() {
        let row = json!({
            "id": "a1b2",
            "updated_at": "2025-04-01T10:30:00.123456"
        });

        let record = record_from_json("Collection", row).unwrap();
        assert_eq!(record.id, "a1b2");
        assert_eq!(record.updated_at.timestamp(), 1_743_503_400);
    }

    #[test]
    fn test_record_from_json_falls_back_to_created_at() {
        let row = json!({
            "id": 1,
            "created_at": "2025-01-15T00:00:00+00:00"
        });

        let record = record_from_json("Customer", row).unwrap();
        assert_eq!(record.updated_at.timestamp(), 1_736_899_200);
        // created_at stays visible to mappers
        assert!(record.fields.contains_key("created_at"));
    }

    #[test]
    fn test_record_from_json_rejects_missing_id() {
        let row = json!({ "name": "no id here" });
        assert!(record_from_json("Product", row).is_err());
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        assert!(record_from_json("Product", json!("scalar")).is_err());
    }
}
