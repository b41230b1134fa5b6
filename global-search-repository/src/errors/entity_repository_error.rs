//! Entity repository error types.

use thiserror::Error;

/// Errors from entity repository operations.
#[derive(Debug, Clone, Error)]
pub enum EntityRepositoryError {
    /// Database query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A row could not be decoded into an `EntityRecord`.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The configured table name is not a valid identifier.
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

impl EntityRepositoryError {
    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create an invalid table name error.
    pub fn invalid_table_name(name: impl Into<String>) -> Self {
        Self::InvalidTableName(name.into())
    }
}

impl From<sqlx::Error> for EntityRepositoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::QueryError(err.to_string())
    }
}
