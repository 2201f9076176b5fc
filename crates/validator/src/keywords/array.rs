//! Array keyword validators.

use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};
use crate::schema::{Schema, SchemaHandle, pointer};

/// Validates that an array has at least `limit` items.
#[derive(Debug, Clone, Copy)]
pub struct MinItems {
    limit: usize,
}

impl KeywordValidator for MinItems {
    fn keyword(&self) -> &'static str {
        "minItems"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Array
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Array {
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
                    "minItems",
                    format!("Array must have at least {} items, got {actual}", self.limit),
                )
                .with_param("minItems", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that an array has at most `limit` items.
#[derive(Debug, Clone, Copy)]
pub struct MaxItems {
    limit: usize,
}

impl KeywordValidator for MaxItems {
    fn keyword(&self) -> &'static str {
        "maxItems"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Array
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Array {
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
                    "maxItems",
                    format!("Array must have at most {} items, got {actual}", self.limit),
                )
                .with_param("maxItems", self.limit)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that no two array items are structurally equal.
///
/// Pairwise comparison; documents validated here are parser output and
/// stay far below sizes where the quadratic scan matters.
#[derive(Debug, Clone, Copy)]
pub struct UniqueItems;

impl KeywordValidator for UniqueItems {
    fn keyword(&self) -> &'static str {
        "uniqueItems"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Array
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Array {
            return Vec::new();
        }
        let items = node.children();
        for (second, item) in items.iter().enumerate().skip(1) {
            if let Some(first) = items[..second].iter().position(|seen| seen.value_eq(item)) {
                return vec![
                    frame
                        .error(
                            node,
                            "uniqueItems",
                            format!("Array items must be unique; items {first} and {second} are equal"),
                        )
                        .with_param("first", first)
                        .with_param("second", second),
                ];
            }
        }
        Vec::new()
    }
}

/// How the `items` keyword maps schemas onto array elements.
#[derive(Debug)]
enum ItemsMode {
    /// One schema applied to every element.
    Uniform(SchemaHandle),
    /// Positional schemas, with an optional schema for the tail
    /// (`additionalItems`).
    Positional {
        schemas: Vec<SchemaHandle>,
        additional: Option<SchemaHandle>,
    },
}

/// Recurses into array elements with the `items` / `additionalItems`
/// schemas.
#[derive(Debug)]
pub struct Items {
    mode: ItemsMode,
}

impl KeywordValidator for Items {
    fn keyword(&self) -> &'static str {
        "items"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Array
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Array {
            return Vec::new();
        }
        let mut errors = Vec::new();
        for (index, child) in node.children().iter().enumerate() {
            let (schema, schema_path) = match &self.mode {
                ItemsMode::Uniform(schema) => {
                    (schema, pointer::join(frame.schema_path(), "items"))
                }
                ItemsMode::Positional { schemas, additional } => match schemas.get(index) {
                    Some(schema) => (
                        schema,
                        pointer::join(
                            &pointer::join(frame.schema_path(), "items"),
                            &index.to_string(),
                        ),
                    ),
                    None => match additional {
                        Some(schema) => {
                            (schema, pointer::join(frame.schema_path(), "additionalItems"))
                        }
                        None => continue,
                    },
                },
            };

            let child_pointer = pointer::join(frame.pointer(), &index.to_string());
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

/// Validates that at least one array item matches a schema.
#[derive(Debug)]
pub struct Contains {
    schema: SchemaHandle,
}

impl KeywordValidator for Contains {
    fn keyword(&self) -> &'static str {
        "contains"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Array
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        if node.kind() != NodeKind::Array {
            return Vec::new();
        }
        let schema_path = pointer::join(frame.schema_path(), "contains");
        let found = node.children().iter().enumerate().any(|(index, child)| {
            let child_pointer = pointer::join(frame.pointer(), &index.to_string());
            frame
                .eval(child, &self.schema, &child_pointer, &schema_path)
                .is_empty()
        });
        if found {
            return Vec::new();
        }
        vec![frame.error(
            node,
            "contains",
            "Array contains no item matching the required schema",
        )]
    }
}

pub(crate) fn min_items_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MinItems {
        limit: value.as_u64()? as usize,
    }))
}

pub(crate) fn max_items_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(MaxItems {
        limit: value.as_u64()? as usize,
    }))
}

pub(crate) fn unique_items_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    // `uniqueItems: false` is the default; no unit needed.
    if value.as_bool()? { Some(Box::new(UniqueItems)) } else { None }
}

pub(crate) fn items_factory(
    value: &Value,
    schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let mode = match value {
        Value::Array(entries) => {
            let schemas: Option<Vec<SchemaHandle>> =
                entries.iter().map(Schema::subschema).collect();
            ItemsMode::Positional {
                schemas: schemas?,
                additional: schema.get("additionalItems").and_then(Schema::subschema),
            }
        }
        other => ItemsMode::Uniform(Schema::subschema(other)?),
    };
    Some(Box::new(Items { mode }))
}

pub(crate) fn contains_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(Contains {
        schema: Schema::subschema(value)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use serde_json::json;
    use trellis_document::Span;

    fn span() -> Span {
        Span::default()
    }

    fn numbers(values: &[f64]) -> DocumentNode {
        DocumentNode::array(
            values.iter().map(|v| DocumentNode::number(*v, span())).collect(),
            span(),
        )
    }

    #[test]
    fn item_count_bounds() {
        let schema = Schema::handle(json!({"minItems": 1, "maxItems": 3})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&numbers(&[1.0]), &schema).valid);
        assert!(validator.validate(&numbers(&[1.0, 2.0, 3.0]), &schema).valid);
        assert!(!validator.validate(&numbers(&[]), &schema).valid);
        assert!(!validator.validate(&numbers(&[1.0, 2.0, 3.0, 4.0]), &schema).valid);
    }

    #[test]
    fn unique_items_reports_duplicate_pair() {
        let schema = Schema::handle(json!({"uniqueItems": true})).unwrap();
        let report = Validator::new().validate(&numbers(&[1.0, 2.0, 1.0]), &schema);
        assert!(!report.valid);
        let error = &report.errors[0];
        assert_eq!(error.param("first"), Some(&json!(0)));
        assert_eq!(error.param("second"), Some(&json!(2)));
    }

    #[test]
    fn unique_items_false_is_inert() {
        let schema = Schema::handle(json!({"uniqueItems": false})).unwrap();
        assert!(Validator::new().validate(&numbers(&[1.0, 1.0]), &schema).valid);
    }

    #[test]
    fn uniform_items_validates_every_element() {
        let schema = Schema::handle(json!({"items": {"minimum": 0}})).unwrap();
        let report = Validator::new().validate(&numbers(&[1.0, -2.0, -3.0]), &schema);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].pointer, "/1");
        assert_eq!(report.errors[1].pointer, "/2");
        assert_eq!(report.errors[0].schema_path, "/items/minimum");
    }

    #[test]
    fn positional_items_with_additional() {
        let schema = Schema::handle(json!({
            "items": [{"type": "string"}, {"type": "number"}],
            "additionalItems": {"type": "boolean"}
        }))
        .unwrap();
        let good = DocumentNode::array(
            vec![
                DocumentNode::string("id", span()),
                DocumentNode::number(1.0, span()),
                DocumentNode::boolean(true, span()),
            ],
            span(),
        );
        assert!(Validator::new().validate(&good, &schema).valid);

        let bad_tail = DocumentNode::array(
            vec![
                DocumentNode::string("id", span()),
                DocumentNode::number(1.0, span()),
                DocumentNode::string("not bool", span()),
            ],
            span(),
        );
        let report = Validator::new().validate(&bad_tail, &schema);
        assert!(!report.valid);
        assert_eq!(report.errors[0].pointer, "/2");
        assert_eq!(report.errors[0].schema_path, "/additionalItems/type");
    }

    #[test]
    fn positional_items_without_additional_ignores_tail() {
        let schema = Schema::handle(json!({"items": [{"type": "string"}]})).unwrap();
        let node = DocumentNode::array(
            vec![
                DocumentNode::string("head", span()),
                DocumentNode::number(99.0, span()),
            ],
            span(),
        );
        assert!(Validator::new().validate(&node, &schema).valid);
    }

    #[test]
    fn contains_needs_one_match() {
        let schema = Schema::handle(json!({"contains": {"minimum": 10}})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&numbers(&[1.0, 20.0]), &schema).valid);

        let report = validator.validate(&numbers(&[1.0, 2.0]), &schema);
        assert_eq!(report.errors[0].keyword, "contains");
    }

    #[test]
    fn contains_fails_on_empty_array() {
        let schema = Schema::handle(json!({"contains": true})).unwrap();
        assert!(!Validator::new().validate(&numbers(&[]), &schema).valid);
    }

    #[test]
    fn array_keywords_inert_on_objects() {
        let schema = Schema::handle(json!({"minItems": 1, "items": false})).unwrap();
        let node = DocumentNode::object(vec![], span());
        assert!(Validator::new().validate(&node, &schema).valid);
    }
}
