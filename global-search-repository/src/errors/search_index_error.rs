//! Search index error types.

use thiserror::Error;

/// Errors from search index operations.
///
/// Used by all `SearchIndexingStrategy` implementations so that callers get
/// consistent error handling regardless of the backing store.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish a connection to the backing store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to persist one or more index items.
    #[error("Persist error: {0}")]
    PersistError(String),

    /// Failed to remove an index item.
    #[error("Remove error: {0}")]
    RemoveError(String),

    /// Failed to initialize the backing store (index/table creation).
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// Failed to serialize data for the backing store.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a persist error.
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::PersistError(msg.into())
    }

    /// Create a remove error.
    pub fn remove(msg: impl Into<String>) -> Self {
        Self::RemoveError(msg.into())
    }

    /// Create an initialization error.
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::InitializationError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
