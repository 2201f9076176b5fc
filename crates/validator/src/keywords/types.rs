//! The `type` keyword.

use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};

/// A single type name admitted by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeName {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl TypeName {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn admits(self, node: &DocumentNode) -> bool {
        match self {
            Self::Null => node.kind() == NodeKind::Null,
            Self::Boolean => node.kind() == NodeKind::Boolean,
            Self::Number => node.kind() == NodeKind::Number,
            // An integer is a number with no fractional part; JSON does
            // not distinguish 1 from 1.0.
            Self::Integer => {
                node.kind() == NodeKind::Number && node.as_f64().is_some_and(|v| v.fract() == 0.0)
            }
            Self::String => node.kind() == NodeKind::String,
            Self::Array => node.kind() == NodeKind::Array,
            Self::Object => node.kind() == NodeKind::Object,
        }
    }
}

/// Validates that a node's kind matches one of the allowed type names.
#[derive(Debug, Clone)]
pub struct Type {
    allowed: Vec<TypeName>,
}

impl KeywordValidator for Type {
    fn keyword(&self) -> &'static str {
        "type"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if self.allowed.iter().any(|name| name.admits(node)) {
            return Vec::new();
        }
        let expected: Vec<&str> = self.allowed.iter().map(|name| name.as_str()).collect();
        vec![
            frame
                .error(
                    node,
                    "type",
                    format!(
                        "Value must be of type {}, got {}",
                        expected.join(" or "),
                        node.kind()
                    ),
                )
                .with_param("expected", expected.clone())
                .with_param("actual", node.kind().as_str()),
        ]
    }
}

pub(crate) fn factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let allowed = match value {
        Value::String(name) => vec![TypeName::parse(name)?],
        Value::Array(names) => {
            let parsed: Option<Vec<TypeName>> = names
                .iter()
                .map(|entry| entry.as_str().and_then(TypeName::parse))
                .collect();
            let parsed = parsed?;
            if parsed.is_empty() {
                return None;
            }
            parsed
        }
        _ => return None,
    };
    Some(Box::new(Type { allowed }))
}
