//! Request context captured by the scheduled indexing task.
//!
//! The context pins an indexing run to a sales channel and language, and is
//! serialized into job payloads so the queue worker can restore it.

use serde::{Deserialize, Serialize};

/// Execution context for an indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The sales-context partition this run indexes.
    pub channel_code: String,
    /// Language for any localized fields.
    pub language_code: String,
}

/// Wire form of [`RequestContext`] carried inside job payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedRequestContext {
    pub channel_code: String,
    pub language_code: String,
}

impl RequestContext {
    pub fn new(channel_code: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            channel_code: channel_code.into(),
            language_code: language_code.into(),
        }
    }

    /// Serialize into the wire form carried by job payloads.
    pub fn serialize(&self) -> SerializedRequestContext {
        SerializedRequestContext {
            channel_code: self.channel_code.clone(),
            language_code: self.language_code.clone(),
        }
    }

    /// Restore a context from its serialized form.
    pub fn from_serialized(serialized: &SerializedRequestContext) -> Self {
        Self {
            channel_code: serialized.channel_code.clone(),
            language_code: serialized.language_code.clone(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("default", "en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_roundtrip() {
        let ctx = RequestContext::new("storefront-eu", "de");
        let restored = RequestContext::from_serialized(&ctx.serialize());
        assert_eq!(ctx, restored);
    }

    #[test]
    fn test_default_context() {
        let ctx = RequestContext::default();
        assert_eq!(ctx.channel_code, "default");
        assert_eq!(ctx.language_code, "en");
    }
}
