//! Error types for the repository crate.

pub mod entity_repository_error;
pub mod search_index_error;

pub use entity_repository_error::EntityRepositoryError;
pub use search_index_error::SearchIndexError;
