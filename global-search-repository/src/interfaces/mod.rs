//! Trait definitions for the persistence seams.

pub mod entity_repository;
pub mod indexing_strategy;

pub use entity_repository::EntityRepository;
pub use indexing_strategy::{NoopIndexingStrategy, SearchIndexingStrategy};
