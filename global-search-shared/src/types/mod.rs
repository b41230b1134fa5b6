//! Core data structures shared across the global search indexing system.

pub mod context;
pub mod entity_record;
pub mod index_item;
pub mod job;

pub use context::{RequestContext, SerializedRequestContext};
pub use entity_record::EntityRecord;
pub use index_item::{IndexItemType, SearchIndexItem};
pub use job::IndexJobData;
