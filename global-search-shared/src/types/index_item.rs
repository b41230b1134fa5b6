//! Search index item types.
//!
//! This module defines the normalized record that entity data mappers produce
//! and that indexing strategies persist.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a search index item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexItemType {
    /// A domain entity (e.g. a product or a customer).
    Entity,
    /// A plugin surfaced in search results.
    Plugin,
    /// A documentation page.
    Docs,
    /// An article or other editorial content.
    Article,
}

impl IndexItemType {
    /// String form used as the persisted `item_type` column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Plugin => "plugin",
            Self::Docs => "docs",
            Self::Article => "article",
        }
    }
}

impl fmt::Display for IndexItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized record for the search index.
///
/// Items are produced transiently per source entity; ownership of persisted
/// data belongs to whatever `SearchIndexingStrategy` is configured.
///
/// Entity-derived items carry the `entity_id`/`entity_name` pair, set
/// together by [`SearchIndexItem::for_entity`]. That pair gives the item a
/// stable logical key, so re-indexing the same entity always supersedes the
/// previous record instead of duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchIndexItem {
    /// Explicit document id. When absent, the id is derived (see
    /// [`SearchIndexItem::document_id`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display title. Required; mappers must always set it.
    pub title: String,
    /// Item category.
    pub item_type: IndexItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Open key-value map for mapper-specific extras.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Last modification time of the source record.
    pub last_modified: DateTime<Utc>,
    /// Source entity id. Set together with `entity_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Source entity type name. Set together with `entity_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
}

impl SearchIndexItem {
    /// Create a plain (non entity-derived) item.
    pub fn new(title: impl Into<String>, item_type: IndexItemType) -> Self {
        Self {
            id: None,
            title: title.into(),
            item_type,
            subtitle: None,
            description: None,
            thumbnail_url: None,
            metadata: HashMap::new(),
            last_modified: Utc::now(),
            entity_id: None,
            entity_name: None,
        }
    }

    /// Create an entity-derived item.
    ///
    /// The entity name and id are set together, which pins the item to the
    /// stable document key `entity_{entity_name}_{entity_id}`.
    pub fn for_entity(
        entity_name: impl Into<String>,
        entity_id: impl Into<String>,
        title: impl Into<String>,
        item_type: IndexItemType,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            item_type,
            subtitle: None,
            description: None,
            thumbnail_url: None,
            metadata: HashMap::new(),
            last_modified,
            entity_id: Some(entity_id.into()),
            entity_name: Some(entity_name.into()),
        }
    }

    /// The stable logical key used in the search index.
    ///
    /// Entity-derived items always map to `entity_{entity_name}_{entity_id}`,
    /// which makes re-indexing idempotent. Other items use their explicit id,
    /// falling back to a freshly generated UUID.
    pub fn document_id(&self) -> String {
        match (&self.entity_name, &self.entity_id) {
            (Some(name), Some(id)) => format!("entity_{}_{}", name, id),
            _ => self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }

    /// Whether this item was derived from a domain entity.
    pub fn is_entity_item(&self) -> bool {
        self.entity_id.is_some() && self.entity_name.is_some()
    }
}
