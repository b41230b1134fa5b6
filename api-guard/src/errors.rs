//! Errors returned to API clients.
//!
//! Messages are deliberately generic. The real reason for a rejection is
//! logged server side only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryGuardError {
    /// The document scored at or above the configured complexity ceiling.
    #[error("Your query is too complex")]
    TooComplex,
    /// The document could not be parsed or names no executable operation.
    #[error("Invalid request")]
    InvalidRequest,
}
