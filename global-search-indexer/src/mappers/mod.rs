//! Entity data mappers.
//!
//! A mapper turns one entity row into a normalized [`SearchIndexItem`]. The
//! registry resolves which mapper serves a given entity type.

mod builtin;
mod registry;

pub use builtin::{GenericMapper, ProductMapper};
pub use registry::MapperRegistry;

use global_search_shared::{EntityRecord, SearchIndexItem};

/// Maps an entity row to a search index item.
///
/// Mapping is pure and infallible: every mapper must produce an item for any
/// record of its entity type, so the fallback chain in [`MapperRegistry`]
/// guarantees every registered entity is indexable at minimum fidelity.
pub trait EntityDataMapper: Send + Sync {
    fn map(&self, record: &EntityRecord) -> SearchIndexItem;
}
