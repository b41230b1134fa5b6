//! Admission control for the public GraphQL surface.
//!
//! Incoming documents are parsed and walked before execution. Each field
//! contributes a complexity score; paginated lists scale with the requested
//! page size, plain lists with a fixed multiplier. Documents whose total score
//! reaches the configured ceiling are rejected with a generic error so the
//! response never reveals the scoring internals.
//!
//! The crate also hardens validation errors: field-suggestion messages
//! produced by the GraphQL layer ("Did you mean ...") leak schema details and
//! are replaced with a generic message before they reach the client.

pub mod complexity;
pub mod config;
pub mod errors;
pub mod guard;
pub mod schema;
pub mod suggestions;

pub use complexity::{estimate, field_complexity};
pub use config::{ApiMode, QueryGuardConfig};
pub use errors::QueryGuardError;
pub use guard::{ApiSurface, QueryGuard};
pub use schema::{SchemaIndex, SchemaIndexBuilder};
pub use suggestions::{mask_field_suggestions, GraphqlError};
