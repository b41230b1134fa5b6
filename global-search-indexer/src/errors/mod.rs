//! Error types for the indexing pipeline.

use thiserror::Error;

use global_search_repository::{EntityRepositoryError, SearchIndexError};

/// Errors that can occur in the indexing pipeline.
#[derive(Error, Debug)]
pub enum IndexError {
    /// An entity type was referenced that is not registered.
    #[error("Unknown entity type: {0}")]
    UnknownEntity(String),

    /// Error from an entity repository.
    #[error("Repository error: {0}")]
    RepositoryError(#[from] EntityRepositoryError),

    /// Error from the indexing strategy.
    #[error("Indexing strategy error: {0}")]
    StrategyError(#[from] SearchIndexError),

    /// Error from the job queue.
    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),
}

impl IndexError {
    /// Create an unknown entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }
}

/// Errors that can occur when interacting with a job queue.
#[derive(Error, Debug, Clone)]
pub enum QueueError {
    /// The queue can no longer accept jobs.
    #[error("Queue closed: {0}")]
    Closed(String),
}

impl QueueError {
    /// Create a queue closed error.
    pub fn closed(msg: impl Into<String>) -> Self {
        Self::Closed(msg.into())
    }
}
