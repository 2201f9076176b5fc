//! Schema combinator keywords: `allOf`, `anyOf`, `oneOf`, `not`.
//!
//! Combinators carry no checks of their own; they recurse into their
//! branch schemas through [`Frame::eval`], the shared evaluation
//! primitive. `allOf` bubbles branch errors up unchanged; the
//! disjunctive forms probe their branches and report a single error of
//! their own, because branch errors of a failed alternative are
//! diagnostics of paths not taken.

use serde_json::{Map, Value};
use trellis_document::DocumentNode;

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};
use crate::schema::{Schema, SchemaHandle, pointer};

/// Validates that a node matches every branch schema.
#[derive(Debug)]
pub struct AllOf {
    branches: Vec<SchemaHandle>,
}

impl KeywordValidator for AllOf {
    fn keyword(&self) -> &'static str {
        "allOf"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let base = pointer::join(frame.schema_path(), "allOf");
        let mut errors = Vec::new();
        for (index, branch) in self.branches.iter().enumerate() {
            let schema_path = pointer::join(&base, &index.to_string());
            let branch_errors = frame.eval(node, branch, frame.pointer(), &schema_path);
            let failed = !branch_errors.is_empty();
            errors.extend(branch_errors);
            if failed && frame.fail_fast() {
                break;
            }
        }
        errors
    }
}

/// Validates that a node matches at least one branch schema.
#[derive(Debug)]
pub struct AnyOf {
    branches: Vec<SchemaHandle>,
}

impl KeywordValidator for AnyOf {
    fn keyword(&self) -> &'static str {
        "anyOf"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let base = pointer::join(frame.schema_path(), "anyOf");
        let matched = self.branches.iter().enumerate().any(|(index, branch)| {
            let schema_path = pointer::join(&base, &index.to_string());
            frame.eval(node, branch, frame.pointer(), &schema_path).is_empty()
        });
        if matched {
            return Vec::new();
        }
        vec![
            frame
                .error(node, "anyOf", "Value does not match any of the expected schemas")
                .with_param("alternatives", self.branches.len()),
        ]
    }
}

/// Validates that a node matches exactly one branch schema.
#[derive(Debug)]
pub struct OneOf {
    branches: Vec<SchemaHandle>,
}

impl KeywordValidator for OneOf {
    fn keyword(&self) -> &'static str {
        "oneOf"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let base = pointer::join(frame.schema_path(), "oneOf");
        let matches = self
            .branches
            .iter()
            .enumerate()
            .filter(|(index, branch)| {
                let schema_path = pointer::join(&base, &index.to_string());
                frame.eval(node, branch, frame.pointer(), &schema_path).is_empty()
            })
            .count();
        if matches == 1 {
            return Vec::new();
        }
        let message = if matches == 0 {
            "Value must match exactly one schema; it matches none".to_owned()
        } else {
            format!("Value must match exactly one schema; it matches {matches}")
        };
        vec![
            frame
                .error(node, "oneOf", message)
                .with_param("matches", matches)
                .with_param("alternatives", self.branches.len()),
        ]
    }
}

/// Validates that a node does *not* match the forbidden schema.
#[derive(Debug)]
pub struct Not {
    schema: SchemaHandle,
}

impl KeywordValidator for Not {
    fn keyword(&self) -> &'static str {
        "not"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let schema_path = pointer::join(frame.schema_path(), "not");
        if frame.eval(node, &self.schema, frame.pointer(), &schema_path).is_empty() {
            return vec![frame.error(node, "not", "Value must not match the forbidden schema")];
        }
        Vec::new()
    }
}

fn branches_from(value: &Value) -> Option<Vec<SchemaHandle>> {
    let entries = value.as_array()?;
    if entries.is_empty() {
        return None;
    }
    entries.iter().map(Schema::subschema).collect()
}

pub(crate) fn all_of_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(AllOf {
        branches: branches_from(value)?,
    }))
}

pub(crate) fn any_of_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(AnyOf {
        branches: branches_from(value)?,
    }))
}

pub(crate) fn one_of_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(OneOf {
        branches: branches_from(value)?,
    }))
}

pub(crate) fn not_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(Not {
        schema: Schema::subschema(value)?,
    }))
}
