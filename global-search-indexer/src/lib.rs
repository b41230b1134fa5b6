//! # Global Search Indexer
//!
//! Indexing pipeline for the platform's global search. Registered entity
//! types are walked in batches, mapped into normalized search index items,
//! and handed to the configured indexing strategy.
//!
//! ## Architecture
//!
//! The pipeline follows a Mapper-Processor-Queue pattern:
//!
//! 1. **Mappers**: Turn entity rows into search index items
//! 2. **Processor**: Walks entity types in batches and persists mapped items
//! 3. **Queue**: Runs one indexing job per entity type on a worker
//! 4. **Service + Task**: Enqueues a full reindex on a recurring schedule
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`mappers`]: Entity data mappers and their registry
//! - [`processor`]: Batch processing over registered entity types
//! - [`queue`]: Job queue abstraction and in-memory implementation
//! - [`service`]: Enqueues indexing jobs and defines the job handler
//! - [`task`]: Recurring trigger for full reindex runs
//! - [`errors`]: Error types for the pipeline

pub mod config;
pub mod errors;
pub mod mappers;
pub mod processor;
pub mod queue;
pub mod service;
pub mod task;

pub use config::Dependencies;
pub use errors::{IndexError, QueueError};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Index error: {0}")]
    IndexError(#[from] IndexError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
