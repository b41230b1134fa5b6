//! Minimal field index over the GraphQL schema.
//!
//! The estimator only needs three facts about a field: the name of the type
//! it yields, whether it is a list, and whether that type is a paginated
//! list container. Rather than dragging a full schema representation in,
//! callers register the fields they expose through [`SchemaIndexBuilder`].

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Name of the type the field resolves to.
    pub type_name: String,
    /// True when the field yields a list of that type.
    pub list: bool,
}

/// Lookup table from `Type.field` to [`FieldInfo`], plus the set of types
/// that follow the paginated-list convention (`items` + `totalItems`).
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    fields: HashMap<String, FieldInfo>,
    paginated: HashSet<String>,
}

impl SchemaIndex {
    pub fn builder() -> SchemaIndexBuilder {
        SchemaIndexBuilder {
            index: SchemaIndex::default(),
        }
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldInfo> {
        self.fields.get(&format!("{type_name}.{field_name}"))
    }

    pub fn is_list(&self, type_name: &str, field_name: &str) -> bool {
        self.field(type_name, field_name).is_some_and(|f| f.list)
    }

    pub fn is_paginated(&self, type_name: &str) -> bool {
        self.paginated.contains(type_name)
    }
}

pub struct SchemaIndexBuilder {
    index: SchemaIndex,
}

impl SchemaIndexBuilder {
    /// Register a scalar or object field.
    pub fn field(
        mut self,
        parent: impl Into<String>,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.index.fields.insert(
            format!("{}.{}", parent.into(), name.into()),
            FieldInfo {
                type_name: type_name.into(),
                list: false,
            },
        );
        self
    }

    /// Register a field that yields a plain list.
    pub fn list_field(
        mut self,
        parent: impl Into<String>,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.index.fields.insert(
            format!("{}.{}", parent.into(), name.into()),
            FieldInfo {
                type_name: type_name.into(),
                list: true,
            },
        );
        self
    }

    /// Mark a type as a paginated list container. Fields resolving to it
    /// are scored against the requested page size.
    pub fn paginated(mut self, type_name: impl Into<String>) -> Self {
        self.index.paginated.insert(type_name.into());
        self
    }

    /// Register the conventional paginated container shape in one call:
    /// `type_name { items: [item_type!]! totalItems: Int! }`.
    pub fn paginated_list_type(self, type_name: &str, item_type: &str) -> Self {
        self.list_field(type_name, "items", item_type)
            .field(type_name, "totalItems", "Int")
            .paginated(type_name)
    }

    pub fn build(self) -> SchemaIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let index = SchemaIndex::builder()
            .field("Query", "product", "Product")
            .list_field("Product", "variants", "ProductVariant")
            .build();

        assert_eq!(index.field("Query", "product").map(|f| f.type_name.as_str()), Some("Product"));
        assert!(!index.is_list("Query", "product"));
        assert!(index.is_list("Product", "variants"));
        assert!(index.field("Query", "missing").is_none());
    }

    #[test]
    fn test_paginated_list_type_registers_shape() {
        let index = SchemaIndex::builder()
            .paginated_list_type("ProductList", "Product")
            .build();

        assert!(index.is_paginated("ProductList"));
        assert!(index.is_list("ProductList", "items"));
        assert_eq!(
            index.field("ProductList", "items").map(|f| f.type_name.as_str()),
            Some("Product")
        );
        assert!(index.field("ProductList", "totalItems").is_some());
    }
}
