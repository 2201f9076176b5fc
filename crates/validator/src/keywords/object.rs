//! Object keyword validators.

use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};
use crate::schema::{Schema, SchemaHandle, pointer};

/// Validates that named members are present.
#[derive(Debug, Clone)]
pub struct Required {
    names: Vec<String>,
}

impl KeywordValidator for Required {
    fn keyword(&self) -> &'static str {
        "required"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Object
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Object {
            return Vec::new();
        }
        let missing: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| node.property(name).is_none())
            .collect();
        if missing.is_empty() {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "required",
                    format!("Missing required properties: {}", missing.join(", ")),
                )
                .with_param("missing", missing.clone()),
        ]
    }
}

/// Validates that an object has at least `limit` members.
#[derive(Debug, Clone, Copy)]
pub struct MinProperties {
    limit: usize,
}

impl KeywordValidator for MinProperties {
    fn keyword(&self) -> &'static str {
        "minProperties"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Object
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Object {
            return Vec::new();
        }
        let actual = node.children().len();
        if actual >= self.limit {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "minProperties",
                    format!("Object must have at least {} properties, got {actual}", self.limit),
                )
                .with_param("minProperties", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that an object has at most `limit` members.
#[derive(Debug, Clone, Copy)]
pub struct MaxProperties {
    limit: usize,
}

impl KeywordValidator for MaxProperties {
    fn keyword(&self) -> &'static str {
        "maxProperties"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Object
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Object {
            return Vec::new();
        }
        let actual = node.children().len();
        if actual <= self.limit {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "maxProperties",
                    format!("Object must have at most {} properties, got {actual}", self.limit),
                )
                .with_param("maxProperties", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Recurses into named members with their property schemas.
///
/// Members the schema does not name are left to `additionalProperties`;
/// named members that are absent are left to `required`.
#[derive(Debug)]
pub struct Properties {
    schemas: Vec<(String, SchemaHandle)>,
}

impl KeywordValidator for Properties {
    fn keyword(&self) -> &'static str {
        "properties"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Object
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Object {
            return Vec::new();
        }
        let base = pointer::join(frame.schema_path(), "properties");
        let mut errors = Vec::new();
        for (name, schema) in &self.schemas {
            let Some(child) = node.property(name) else {
                continue;
            };
            let child_pointer = pointer::join(frame.pointer(), name);
            let schema_path = pointer::join(&base, name);
            let child_errors = frame.eval(child, schema, &child_pointer, &schema_path);
            let failed = !child_errors.is_empty();
            errors.extend(child_errors);
            if failed && frame.fail_fast() {
                break;
            }
        }
        errors
    }
}

/// Applies a schema to members not named by the sibling `properties`.
///
/// The common `additionalProperties: false` form falls out of the
/// boolean-schema rules: every extra member is evaluated against the
/// `false` schema and reports one error.
#[derive(Debug)]
pub struct AdditionalProperties {
    schema: SchemaHandle,
    known: Vec<String>,
}

impl KeywordValidator for AdditionalProperties {
    fn keyword(&self) -> &'static str {
        "additionalProperties"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Object
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Object {
            return Vec::new();
        }
        let schema_path = pointer::join(frame.schema_path(), "additionalProperties");
        let mut errors = Vec::new();
        for child in node.children() {
            let Some(name) = child.name() else {
                continue;
            };
            if self.known.iter().any(|known| known == name) {
                continue;
            }
            let child_pointer = pointer::join(frame.pointer(), name);
            let child_errors = frame.eval(child, &self.schema, &child_pointer, &schema_path);
            let failed = !child_errors.is_empty();
            errors.extend(child_errors);
            if failed && frame.fail_fast() {
                break;
            }
        }
        errors
    }
}

pub(crate) fn required_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let names: Option<Vec<String>> = value
        .as_array()?
        .iter()
        .map(|entry| entry.as_str().map(str::to_owned))
        .collect();
    Some(Box::new(Required { names: names? }))
}

pub(crate) fn min_properties_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MinProperties {
        limit: value.as_u64()? as usize,
    }))
}

pub(crate) fn max_properties_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MaxProperties {
        limit: value.as_u64()? as usize,
    }))
}

pub(crate) fn properties_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let members = value.as_object()?;
    let schemas: Option<Vec<(String, SchemaHandle)>> = members
        .iter()
        .map(|(name, member)| Schema::subschema(member).map(|schema| (name.clone(), schema)))
        .collect();
    Some(Box::new(Properties { schemas: schemas? }))
}

pub(crate) fn additional_properties_factory(
    value: &Value,
    schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let known = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|members| members.keys().cloned().collect())
        .unwrap_or_default();
    Some(Box::new(AdditionalProperties {
        schema: Schema::subschema(value)?,
        known,
    }))
}
