//! The `enum` and `const` keywords.

use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};

/// Structural comparison between a document node and a JSON literal.
///
/// Arrays compare element-wise in order; objects compare by member name
/// regardless of order; numbers compare as `f64`.
pub(crate) fn node_matches(node: &DocumentNode, value: &Value) -> bool {
    match value {
        Value::Null => node.kind() == NodeKind::Null,
        Value::Bool(expected) => node.as_bool() == Some(*expected),
        Value::Number(expected) => node
            .as_f64()
            .zip(expected.as_f64())
            .is_some_and(|(a, b)| a == b),
        Value::String(expected) => node.as_str() == Some(expected),
        Value::Array(items) => {
            node.kind() == NodeKind::Array
                && node.children().len() == items.len()
                && node
                    .children()
                    .iter()
                    .zip(items)
                    .all(|(child, item)| node_matches(child, item))
        }
        Value::Object(members) => {
            node.kind() == NodeKind::Object
                && node.children().len() == members.len()
                && members.iter().all(|(name, member)| {
                    node.property(name)
                        .is_some_and(|child| node_matches(child, member))
                })
        }
    }
}

/// Validates that a node equals one of a fixed set of literals.
#[derive(Debug, Clone)]
pub struct Enum {
    allowed: Vec<Value>,
}

impl KeywordValidator for Enum {
    fn keyword(&self) -> &'static str {
        "enum"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if self.allowed.iter().any(|value| node_matches(node, value)) {
            return Vec::new();
        }
        vec![
            frame
                .error(node, "enum", "Value is not one of the allowed values")
                .with_param("allowed", Value::Array(self.allowed.clone())),
        ]
    }
}

/// Validates that a node equals exactly one literal.
#[derive(Debug, Clone)]
pub struct Const {
    expected: Value,
}

impl KeywordValidator for Const {
    fn keyword(&self) -> &'static str {
        "const"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node_matches(node, &self.expected) {
            return Vec::new();
        }
        vec![
            frame
                .error(node, "const", format!("Value must equal {}", self.expected))
                .with_param("const", self.expected.clone()),
        ]
    }
}

pub(crate) fn enum_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let allowed = value.as_array()?;
    if allowed.is_empty() {
        return None;
    }
    Some(Box::new(Enum {
        allowed: allowed.clone(),
    }))
}

pub(crate) fn const_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(Const {
        expected: value.clone(),
    }))
}
