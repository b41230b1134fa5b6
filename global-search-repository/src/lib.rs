//! # Global Search Repository
//!
//! This crate provides the persistence seams of the global search system:
//! the [`SearchIndexingStrategy`] trait that abstracts the backing search
//! store, the [`EntityRepository`] trait that abstracts row access for a
//! registered entity type, and the [`EntityRegistry`] that enumerates
//! registered types in a stable order. PostgreSQL implementations of both
//! traits live in the [`postgres`] module.

pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod registry;

pub use errors::{EntityRepositoryError, SearchIndexError};
pub use interfaces::{EntityRepository, NoopIndexingStrategy, SearchIndexingStrategy};
pub use postgres::{PgEntityRepository, PostgresIndexingStrategy};
pub use registry::{EntityMetadata, EntityRegistry, RegisteredEntity};
