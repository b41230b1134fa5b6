//! Job payload types for the indexing queue.

use serde::{Deserialize, Serialize};

use crate::types::context::SerializedRequestContext;

/// Payload enqueued onto the background job queue.
///
/// One job is enqueued per registered entity type. The payload is consumed
/// exactly once by the queue worker; it exists only inside the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexJobData {
    /// Name of the entity type this job indexes.
    pub entity_name: String,
    /// Serialized execution context for the run.
    pub ctx: SerializedRequestContext,
}

impl IndexJobData {
    pub fn new(entity_name: impl Into<String>, ctx: SerializedRequestContext) -> Self {
        Self {
            entity_name: entity_name.into(),
            ctx,
        }
    }
}
