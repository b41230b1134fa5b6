//! # Global Search Shared
//!
//! This crate defines shared data structures and types used across the global
//! search indexing system. It includes the normalized index item produced by
//! entity data mappers, the job payload that flows through the job queue, and
//! the request context captured by the scheduled indexing task.

pub mod types;

pub use types::context::{RequestContext, SerializedRequestContext};
pub use types::entity_record::EntityRecord;
pub use types::index_item::{IndexItemType, SearchIndexItem};
pub use types::job::IndexJobData;
