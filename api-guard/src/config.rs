//! Guard configuration.

use std::collections::HashMap;

/// Deployment mode of the API. Development keeps diagnostics verbose,
/// production masks anything that could reveal schema internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Dev,
    Prod,
}

/// Tuning knobs for [`crate::QueryGuard`].
#[derive(Debug, Clone)]
pub struct QueryGuardConfig {
    /// Documents scoring at or above this value are rejected.
    pub max_query_complexity: u64,
    /// Per-field weight overrides, keyed as `"Type.field"`.
    pub custom_complexity_factors: HashMap<String, u64>,
    /// Log the computed score for every checked document.
    pub log_complexity_score: bool,
    /// Replace field-suggestion validation messages with a generic one.
    pub hide_field_suggestions: bool,
    pub api_mode: ApiMode,
}

impl Default for QueryGuardConfig {
    fn default() -> Self {
        Self {
            max_query_complexity: 1000,
            custom_complexity_factors: HashMap::new(),
            log_complexity_score: false,
            hide_field_suggestions: true,
            api_mode: ApiMode::Prod,
        }
    }
}

impl QueryGuardConfig {
    pub fn with_max_complexity(mut self, max: u64) -> Self {
        self.max_query_complexity = max;
        self
    }

    pub fn with_factor(mut self, field_path: impl Into<String>, weight: u64) -> Self {
        self.custom_complexity_factors.insert(field_path.into(), weight);
        self
    }

    pub fn factor_for(&self, type_name: &str, field_name: &str) -> Option<u64> {
        self.custom_complexity_factors
            .get(&format!("{type_name}.{field_name}"))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueryGuardConfig::default();
        assert_eq!(config.max_query_complexity, 1000);
        assert!(config.hide_field_suggestions);
        assert!(!config.log_complexity_score);
        assert_eq!(config.api_mode, ApiMode::Prod);
    }

    #[test]
    fn test_factor_lookup() {
        let config = QueryGuardConfig::default().with_factor("Query.search", 7);
        assert_eq!(config.factor_for("Query", "search"), Some(7));
        assert_eq!(config.factor_for("Query", "products"), None);
    }
}
