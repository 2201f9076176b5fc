//! String keyword validators.

use regex::Regex;
use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};

/// Validates that a string has at least `limit` characters.
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    limit: usize,
}

impl KeywordValidator for MinLength {
    fn keyword(&self) -> &'static str {
        "minLength"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::String
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let Some(text) = node.as_str() else {
            return Vec::new();
        };
        let actual = text.chars().count();
        if actual >= self.limit {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "minLength",
                    format!("String must be at least {} characters, got {actual}", self.limit),
                )
                .with_param("minLength", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that a string has at most `limit` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    limit: usize,
}

impl KeywordValidator for MaxLength {
    fn keyword(&self) -> &'static str {
        "maxLength"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::String
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let Some(text) = node.as_str() else {
            return Vec::new();
        };
        let actual = text.chars().count();
        if actual <= self.limit {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "maxLength",
                    format!("String must be at most {} characters, got {actual}", self.limit),
                )
                .with_param("maxLength", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that a string matches a regular expression.
///
/// The pattern is compiled once, at schema-compile time; an invalid
/// pattern never reaches this type (its factory returns `None`).
/// Matching is unanchored, per JSON-Schema semantics.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl KeywordValidator for Pattern {
    fn keyword(&self) -> &'static str {
        "pattern"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::String
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let Some(text) = node.as_str() else {
            return Vec::new();
        };
        if self.regex.is_match(text) {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "pattern",
                    format!("String \"{text}\" does not match pattern \"{}\"", self.regex),
                )
                .with_param("pattern", self.regex.as_str())
                .with_param("actual", text),
        ]
    }
}

fn limit_from(value: &Value) -> Option<usize> {
    value.as_u64().map(|limit| limit as usize)
}

pub(crate) fn min_length_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MinLength {
        limit: limit_from(value)?,
    }))
}

pub(crate) fn max_length_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MaxLength {
        limit: limit_from(value)?,
    }))
}

pub(crate) fn pattern_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let regex = Regex::new(value.as_str()?).ok()?;
    Some(Box::new(Pattern { regex }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use crate::schema::Schema;
    use serde_json::json;
    use trellis_document::Span;

    fn string(text: &str) -> DocumentNode {
        DocumentNode::string(text, Span::default())
    }

    #[test]
    fn length_bounds() {
        let schema = Schema::handle(json!({"minLength": 3, "maxLength": 5})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&string("abc"), &schema).valid);
        assert!(validator.validate(&string("abcde"), &schema).valid);
        assert!(!validator.validate(&string("ab"), &schema).valid);
        assert!(!validator.validate(&string("abcdef"), &schema).valid);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let schema = Schema::handle(json!({"maxLength": 3})).unwrap();
        // Three characters, nine bytes.
        assert!(Validator::new().validate(&string("äöü"), &schema).valid);
    }

    #[test]
    fn pattern_matches_unanchored() {
        let schema = Schema::handle(json!({"pattern": "[0-9]{3}"})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&string("abc123def"), &schema).valid);
        assert!(!validator.validate(&string("no digits"), &schema).valid);
    }

    #[test]
    fn invalid_pattern_degrades_to_no_check() {
        let schema = Schema::handle(json!({"pattern": "([unclosed"})).unwrap();
        assert!(Validator::new().validate(&string("anything"), &schema).valid);
    }

    #[test]
    fn string_keywords_inert_on_numbers() {
        let schema = Schema::handle(json!({"minLength": 3, "pattern": "x"})).unwrap();
        let node = DocumentNode::number(1.0, Span::default());
        assert!(Validator::new().validate(&node, &schema).valid);
    }

    #[test]
    fn pattern_error_embeds_value_and_pattern() {
        let schema = Schema::handle(json!({"pattern": "^[a-z]+$"})).unwrap();
        let report = Validator::new().validate(&string("Nope!"), &schema);
        let error = &report.errors[0];
        assert!(error.message.contains("Nope!"));
        assert_eq!(error.param("pattern"), Some(&json!("^[a-z]+$")));
    }
}
