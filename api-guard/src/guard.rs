//! Admission check applied to documents before execution.

use std::collections::HashMap;

use async_graphql_parser::parse_query;
use async_graphql_value::ConstValue;
use tracing::{debug, info, warn};

use crate::complexity::estimate;
use crate::config::{ApiMode, QueryGuardConfig};
use crate::errors::QueryGuardError;
use crate::schema::SchemaIndex;

/// Which API surface the guard is protecting. Only the public shop surface
/// is policed; the admin surface is authenticated and trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    Shop,
    Admin,
}

/// Scores incoming documents and rejects those over the complexity ceiling.
pub struct QueryGuard {
    config: QueryGuardConfig,
    schema: SchemaIndex,
    surface: ApiSurface,
}

impl QueryGuard {
    pub fn new(config: QueryGuardConfig, schema: SchemaIndex, surface: ApiSurface) -> Self {
        if config.api_mode == ApiMode::Dev {
            warn!("api guard running in dev mode, error messages are not hardened");
        }
        Self {
            config,
            schema,
            surface,
        }
    }

    pub fn with_schema(schema: SchemaIndex) -> Self {
        Self::new(QueryGuardConfig::default(), schema, ApiSurface::Shop)
    }

    /// Check a raw document. Returns the computed score on admission.
    ///
    /// Admin-surface guards admit without scoring. Rejections carry a
    /// generic error; the actual score is only visible in server logs.
    pub fn check(
        &self,
        query: &str,
        operation_name: Option<&str>,
        variables: &HashMap<String, ConstValue>,
    ) -> Result<u64, QueryGuardError> {
        if self.surface == ApiSurface::Admin {
            return Ok(0);
        }

        let document = parse_query(query).map_err(|e| {
            debug!(error = %e, "rejecting unparseable document");
            QueryGuardError::InvalidRequest
        })?;

        let score = estimate(&self.config, &self.schema, &document, operation_name, variables)?;

        if self.config.log_complexity_score {
            info!(score, "query complexity");
        }
        if score >= self.config.max_query_complexity {
            warn!(
                score,
                limit = self.config.max_query_complexity,
                "rejecting query over complexity limit"
            );
            return Err(QueryGuardError::TooComplex);
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryGuardConfig;

    fn schema() -> SchemaIndex {
        SchemaIndex::builder()
            .field("Query", "products", "ProductList")
            .field("Product", "name", "String")
            .paginated_list_type("ProductList", "Product")
            .build()
    }

    fn shop_guard(max: u64) -> QueryGuard {
        QueryGuard::new(
            QueryGuardConfig::default().with_max_complexity(max),
            schema(),
            ApiSurface::Shop,
        )
    }

    const LIST_QUERY: &str = "{ products(take: 2) { totalItems items { name } } }";

    #[test]
    fn test_rejects_at_threshold() {
        // LIST_QUERY scores exactly 10
        let result = shop_guard(10).check(LIST_QUERY, None, &HashMap::new());
        assert_eq!(result, Err(QueryGuardError::TooComplex));
    }

    #[test]
    fn test_admits_below_threshold() {
        let result = shop_guard(11).check(LIST_QUERY, None, &HashMap::new());
        assert_eq!(result, Ok(10));
    }

    #[test]
    fn test_admin_surface_is_not_scored() {
        let guard = QueryGuard::new(
            QueryGuardConfig::default().with_max_complexity(1),
            schema(),
            ApiSurface::Admin,
        );
        let result = guard.check(LIST_QUERY, None, &HashMap::new());
        assert_eq!(result, Ok(0));
    }

    #[test]
    fn test_parse_failure_is_generic() {
        let guard = QueryGuard::with_schema(schema());
        let result = guard.check("{ products(", None, &HashMap::new());
        assert_eq!(result, Err(QueryGuardError::InvalidRequest));
    }

    #[test]
    fn test_unbounded_list_hits_default_limit() {
        let guard = QueryGuard::with_schema(schema());
        let result = guard.check(
            "{ products { totalItems items { name } } }",
            None,
            &HashMap::new(),
        );
        assert_eq!(result, Err(QueryGuardError::TooComplex));
    }
}
