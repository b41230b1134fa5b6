//! Complexity scoring for executable GraphQL documents.
//!
//! Scoring rules, applied bottom up over the selection tree:
//!
//! * a field with a custom weight scores `max(child, 1) * weight`
//! * a field resolving to a paginated list scores
//!   `child + round(ln(max(child, 1)) * take)`, where `take` is the requested
//!   page size (falling back to [`DEFAULT_LIST_SIZE`] when absent)
//! * a plain list field scores `child * LIST_FACTOR`
//! * any other field scores `child + 1`
//!
//! Fragment spreads are resolved against the document's fragment definitions;
//! a spread already on the current resolution path contributes nothing, so
//! cyclic fragments cannot send the walk into a loop.

use std::collections::{HashMap, HashSet};

use async_graphql_parser::types::{
    DocumentOperations, ExecutableDocument, Field, FragmentDefinition, OperationDefinition,
    OperationType, Selection, SelectionSet,
};
use async_graphql_parser::Positioned;
use async_graphql_value::{ConstValue, Name, Value};

use crate::config::QueryGuardConfig;
use crate::errors::QueryGuardError;
use crate::schema::SchemaIndex;

/// Page size assumed for paginated lists when the document does not pass one.
/// Matches the worst case a client can request, so an unbounded list query is
/// scored as expensive as the largest page it could return.
pub const DEFAULT_LIST_SIZE: u64 = 1000;

/// Multiplier for list fields that are not paginated containers.
pub const LIST_FACTOR: u64 = 5;

/// Score a single field given the combined score of its children.
///
/// `take` is the page size extracted from the field's arguments, if any.
pub fn field_complexity(
    config: &QueryGuardConfig,
    schema: &SchemaIndex,
    type_name: &str,
    field_name: &str,
    take: Option<u64>,
    child_score: u64,
) -> u64 {
    if let Some(weight) = config.factor_for(type_name, field_name) {
        return child_score.max(1) * weight;
    }
    let Some(info) = schema.field(type_name, field_name) else {
        return child_score + 1;
    };
    if schema.is_paginated(&info.type_name) {
        let take = take.unwrap_or(DEFAULT_LIST_SIZE);
        let scaled = ((child_score.max(1) as f64).ln() * take as f64).round() as u64;
        return child_score + scaled;
    }
    if info.list {
        return child_score * LIST_FACTOR;
    }
    child_score + 1
}

/// Score an executable document against the schema index.
///
/// `operation_name` selects the operation in multi-operation documents;
/// `variables` are used to resolve `take` arguments passed indirectly.
pub fn estimate(
    config: &QueryGuardConfig,
    schema: &SchemaIndex,
    document: &ExecutableDocument,
    operation_name: Option<&str>,
    variables: &HashMap<String, ConstValue>,
) -> Result<u64, QueryGuardError> {
    let operation = select_operation(document, operation_name)?;
    let root_type = match operation.ty {
        OperationType::Query => "Query",
        OperationType::Mutation => "Mutation",
        OperationType::Subscription => "Subscription",
    };
    let estimator = Estimator {
        config,
        schema,
        variables,
        fragments: &document.fragments,
    };
    let mut active_fragments = HashSet::new();
    Ok(estimator.selection_set(root_type, &operation.selection_set.node, &mut active_fragments))
}

fn select_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Result<&'a OperationDefinition, QueryGuardError> {
    match &document.operations {
        DocumentOperations::Single(operation) => Ok(&operation.node),
        DocumentOperations::Multiple(operations) => match operation_name {
            Some(name) => operations
                .iter()
                .find(|(op_name, _)| op_name.as_str() == name)
                .map(|(_, operation)| &operation.node)
                .ok_or(QueryGuardError::InvalidRequest),
            None => {
                let mut iter = operations.values();
                match (iter.next(), iter.next()) {
                    (Some(operation), None) => Ok(&operation.node),
                    _ => Err(QueryGuardError::InvalidRequest),
                }
            }
        },
    }
}

struct Estimator<'a> {
    config: &'a QueryGuardConfig,
    schema: &'a SchemaIndex,
    variables: &'a HashMap<String, ConstValue>,
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
}

impl Estimator<'_> {
    fn selection_set(
        &self,
        parent_type: &str,
        set: &SelectionSet,
        active_fragments: &mut HashSet<String>,
    ) -> u64 {
        set.items
            .iter()
            .map(|selection| self.selection(parent_type, &selection.node, active_fragments))
            .sum()
    }

    fn selection(
        &self,
        parent_type: &str,
        selection: &Selection,
        active_fragments: &mut HashSet<String>,
    ) -> u64 {
        match selection {
            Selection::Field(field) => self.field(parent_type, &field.node, active_fragments),
            Selection::FragmentSpread(spread) => {
                let name = spread.node.fragment_name.node.as_str();
                if active_fragments.contains(name) {
                    return 0;
                }
                let Some(fragment) = self.fragments.get(&spread.node.fragment_name.node) else {
                    return 0;
                };
                active_fragments.insert(name.to_string());
                let score = self.selection_set(
                    fragment.node.type_condition.node.on.node.as_str(),
                    &fragment.node.selection_set.node,
                    active_fragments,
                );
                active_fragments.remove(name);
                score
            }
            Selection::InlineFragment(inline) => {
                let type_name = inline
                    .node
                    .type_condition
                    .as_ref()
                    .map(|tc| tc.node.on.node.as_str())
                    .unwrap_or(parent_type);
                self.selection_set(type_name, &inline.node.selection_set.node, active_fragments)
            }
        }
    }

    fn field(
        &self,
        parent_type: &str,
        field: &Field,
        active_fragments: &mut HashSet<String>,
    ) -> u64 {
        let field_name = field.name.node.as_str();
        let child_type = self
            .schema
            .field(parent_type, field_name)
            .map(|info| info.type_name.as_str())
            .unwrap_or("");
        let child_score = self.selection_set(child_type, &field.selection_set.node, active_fragments);
        let take = self.take_argument(&field.arguments);
        field_complexity(
            self.config,
            self.schema,
            parent_type,
            field_name,
            take,
            child_score,
        )
    }

    /// Extract the requested page size from `take: N` or `options: { take: N }`,
    /// following variables where the document passes them indirectly.
    fn take_argument(&self, arguments: &[(Positioned<Name>, Positioned<Value>)]) -> Option<u64> {
        for (name, value) in arguments {
            match name.node.as_str() {
                "take" => return self.value_as_u64(&value.node),
                "options" => {
                    if let Some(take) = self.options_take(&value.node) {
                        return Some(take);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn options_take(&self, value: &Value) -> Option<u64> {
        match value {
            Value::Object(map) => map
                .iter()
                .find(|(key, _)| key.as_str() == "take")
                .and_then(|(_, v)| self.value_as_u64(v)),
            Value::Variable(var) => match self.variables.get(var.as_str()) {
                Some(ConstValue::Object(map)) => map
                    .iter()
                    .find(|(key, _)| key.as_str() == "take")
                    .and_then(|(_, v)| const_as_u64(v)),
                _ => None,
            },
            _ => None,
        }
    }

    fn value_as_u64(&self, value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64(),
            Value::Variable(var) => self.variables.get(var.as_str()).and_then(const_as_u64),
            _ => None,
        }
    }
}

fn const_as_u64(value: &ConstValue) -> Option<u64> {
    match value {
        ConstValue::Number(n) => n.as_u64(),
        _ => None,
    }
}
