//! PostgreSQL implementations of the persistence seams.

pub mod entity_repository;
pub mod indexing_strategy;

pub use entity_repository::PgEntityRepository;
pub use indexing_strategy::PostgresIndexingStrategy;

/// Check that a configured table name is safe to interpolate into SQL.
///
/// Table names come from deployment configuration, not user input, but they
/// are interpolated into query text, so they are restricted to plain
/// identifiers.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
