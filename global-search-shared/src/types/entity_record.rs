//! Normalized row view returned by entity repositories.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A domain entity row, normalized for mapping.
///
/// Repositories pull the id and last-modified timestamp out of the row and
/// expose every remaining column through `fields`, so data mappers never
/// depend on a concrete table layout.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    /// Name of the entity type this row belongs to.
    pub entity_name: String,
    /// Primary key, rendered as a string.
    pub id: String,
    /// Last modification time of the row.
    pub updated_at: DateTime<Utc>,
    /// Remaining columns, keyed by column name.
    pub fields: HashMap<String, serde_json::Value>,
}

impl EntityRecord {
    pub fn new(
        entity_name: impl Into<String>,
        id: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            id: id.into(),
            updated_at,
            fields: HashMap::new(),
        }
    }

    /// Convenience accessor for a string-typed field.
    pub fn string_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_field_accessor() {
        let mut record = EntityRecord::new("Product", "1", Utc::now());
        record
            .fields
            .insert("name".to_string(), serde_json::json!("Chair"));
        record
            .fields
            .insert("enabled".to_string(), serde_json::json!(true));

        assert_eq!(record.string_field("name"), Some("Chair"));
        assert_eq!(record.string_field("enabled"), None);
        assert_eq!(record.string_field("missing"), None);
    }
}
