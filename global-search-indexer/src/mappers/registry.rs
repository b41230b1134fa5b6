//! Mapper registry with fallback resolution.

use std::collections::HashMap;
use std::sync::Arc;

use global_search_shared::{EntityRecord, SearchIndexItem};

use crate::mappers::builtin::{GenericMapper, ProductMapper};
use crate::mappers::EntityDataMapper;

/// Resolves the data mapper for an entity type.
///
/// Resolution order:
///
/// 1. a mapper explicitly registered for the type name (plugin configuration)
/// 2. a built-in mapper for known types (currently Product)
/// 3. the generic fallback mapper
///
/// The fallback always succeeds, so no error is ever raised for an unknown
/// entity type.
pub struct MapperRegistry {
    registered: HashMap<String, Arc<dyn EntityDataMapper>>,
    builtin: HashMap<String, Arc<dyn EntityDataMapper>>,
    fallback: Arc<dyn EntityDataMapper>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        let mut builtin: HashMap<String, Arc<dyn EntityDataMapper>> = HashMap::new();
        builtin.insert("Product".to_string(), Arc::new(ProductMapper::new()));

        Self {
            registered: HashMap::new(),
            builtin,
            fallback: Arc::new(GenericMapper::new()),
        }
    }

    /// Create a registry pre-populated with configured mappers.
    pub fn with_mappers(mappers: Vec<(String, Arc<dyn EntityDataMapper>)>) -> Self {
        let mut registry = Self::new();
        for (entity_name, mapper) in mappers {
            registry.register(entity_name, mapper);
        }
        registry
    }

    /// Register a mapper for an entity type, overriding any built-in.
    pub fn register(&mut self, entity_name: impl Into<String>, mapper: Arc<dyn EntityDataMapper>) {
        self.registered.insert(entity_name.into(), mapper);
    }

    /// Map a record through the resolved mapper.
    pub fn map(&self, record: &EntityRecord) -> SearchIndexItem {
        self.resolve(&record.entity_name).map(record)
    }

    fn resolve(&self, entity_name: &str) -> &dyn EntityDataMapper {
        if let Some(mapper) = self.registered.get(entity_name) {
            return mapper.as_ref();
        }
        if let Some(mapper) = self.builtin.get(entity_name) {
            return mapper.as_ref();
        }
        self.fallback.as_ref()
    }
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}
