//! Entity metadata registry.
//!
//! Enumerates registered entity types and their repositories in a stable
//! order. Registration is explicit: there is no reflection, so everything the
//! pipeline can index is visible at construction time.

use std::sync::Arc;

use tracing::warn;

use crate::interfaces::EntityRepository;

/// Description of a registered entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMetadata {
    /// Logical entity type name (e.g. "Product").
    pub name: String,
    /// Mapped database table.
    pub table: String,
}

impl EntityMetadata {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
        }
    }
}

/// A registered entity type together with its repository.
pub struct RegisteredEntity {
    pub metadata: EntityMetadata,
    pub repository: Arc<dyn EntityRepository>,
}

/// Ordered collection of registered entity types.
///
/// The registration order is the order in which batch processing walks the
/// types, so it must stay stable across runs of the same configuration.
#[derive(Default)]
pub struct EntityRegistry {
    entries: Vec<RegisteredEntity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type. A duplicate name replaces the previous
    /// registration in place, keeping the original position.
    pub fn register(&mut self, metadata: EntityMetadata, repository: Arc<dyn EntityRepository>) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.metadata.name == metadata.name)
        {
            warn!(entity_name = %metadata.name, "Replacing existing entity registration");
            existing.metadata = metadata;
            existing.repository = repository;
            return;
        }
        self.entries.push(RegisteredEntity {
            metadata,
            repository,
        });
    }

    /// All registered entries, in registration order.
    pub fn entries(&self) -> &[RegisteredEntity] {
        &self.entries
    }

    /// Look up a registered entity type by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredEntity> {
        self.entries.iter().find(|e| e.metadata.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
