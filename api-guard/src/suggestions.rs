//! Hardening of validation errors before they leave the server.
//!
//! GraphQL validation errors for unknown fields include suggestions such as
//! `Cannot query field "nmae" on type "Product". Did you mean "name"?`,
//! which lets an unauthenticated caller enumerate the schema one typo at a
//! time. In production those messages are replaced wholesale.

use serde::{Deserialize, Serialize};

use crate::config::{ApiMode, QueryGuardConfig};

pub const GENERIC_INVALID_REQUEST: &str = "Invalid request";

const SUGGESTION_MARKER: &str = "Did you mean";

/// Wire shape of a GraphQL error as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }
}

/// Rewrite any error carrying a field suggestion to the generic message.
///
/// Masking applies in production when `hide_field_suggestions` is set;
/// development keeps the original diagnostics.
pub fn mask_field_suggestions(config: &QueryGuardConfig, errors: &mut [GraphqlError]) {
    if !config.hide_field_suggestions || config.api_mode == ApiMode::Dev {
        return;
    }
    for error in errors.iter_mut() {
        if error.message.contains(SUGGESTION_MARKER) {
            error.message = GENERIC_INVALID_REQUEST.to_string();
        }
    }
}
