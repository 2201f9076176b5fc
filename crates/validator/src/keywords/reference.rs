//! The `$ref` keyword.
//!
//! References resolve against the run's root schema (`#`, `#/…`) or the
//! context's [`SchemaStore`](crate::schema::SchemaStore) (any other base
//! URI). Resolution failures are reported, never thrown: a dangling
//! reference yields a `$ref` error and a cyclic chain yields a distinct
//! `$refCycle` error instead of unbounded recursion.

use serde_json::{Map, Value};
use trellis_document::DocumentNode;

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};
use crate::schema::pointer;

/// Expands a schema reference and validates the node against its target.
#[derive(Debug, Clone)]
pub struct Ref {
    reference: String,
}

impl KeywordValidator for Ref {
    fn keyword(&self) -> &'static str {
        "$ref"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let schema_path = pointer::join(frame.schema_path(), "$ref");

        let Some(target) = frame.resolve_reference(&self.reference) else {
            return vec![
                frame
                    .error(
                        node,
                        "$ref",
                        format!("Unresolved schema reference \"{}\"", self.reference),
                    )
                    .with_param("ref", self.reference.as_str()),
            ];
        };

        if frame.in_ref_chain(&target) {
            return vec![
                ValidationError::new(
                    "$refCycle",
                    format!("Cyclic schema reference \"{}\"", self.reference),
                )
                .with_pointer(frame.pointer().to_owned())
                .with_schema_path(schema_path)
                .with_span(node.span().clone())
                .with_param("ref", self.reference.as_str()),
            ];
        }

        frame.eval_ref(node, &target, &schema_path)
    }
}

pub(crate) fn ref_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(Ref {
        reference: value.as_str()?.to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use crate::foundation::ValidationContext;
    use crate::schema::{Schema, SchemaStore};
    use serde_json::json;
    use std::sync::Arc;
    use trellis_document::{DocumentNode, Span};

    fn number(value: f64) -> DocumentNode {
        DocumentNode::number(value, Span::default())
    }

    #[test]
    fn local_definition_reference() {
        let schema = Schema::handle(json!({
            "definitions": {"positive": {"exclusiveMinimum": 0}},
            "$ref": "#/definitions/positive"
        }))
        .unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&number(3.0), &schema).valid);

        let report = validator.validate(&number(-3.0), &schema);
        assert_eq!(report.errors[0].keyword, "exclusiveMinimum");
        assert_eq!(report.errors[0].schema_path, "/$ref/exclusiveMinimum");
    }

    #[test]
    fn unresolved_reference_is_reported() {
        let schema = Schema::handle(json!({"$ref": "#/definitions/missing"})).unwrap();
        let report = Validator::new().validate(&number(1.0), &schema);
        assert!(!report.valid);
        assert_eq!(report.errors[0].keyword, "$ref");
        assert_eq!(report.errors[0].param("ref"), Some(&json!("#/definitions/missing")));
    }

    #[test]
    fn store_reference_resolves_across_documents() {
        let shared = Schema::handle(json!({"type": "string"})).unwrap();
        let mut store = SchemaStore::new();
        store.register("https://example.org/name.json", shared);

        let schema = Schema::handle(json!({"$ref": "https://example.org/name.json"})).unwrap();
        let ctx = ValidationContext::new().with_store(Arc::new(store));
        let validator = Validator::new();

        let ok = validator.validate_with(&DocumentNode::string("x", Span::default()), &schema, &ctx);
        assert!(ok.valid);

        let bad = validator.validate_with(&number(1.0), &schema, &ctx);
        assert_eq!(bad.errors[0].keyword, "type");
    }

    #[test]
    fn store_reference_without_store_dangles() {
        let schema = Schema::handle(json!({"$ref": "https://example.org/name.json"})).unwrap();
        let report = Validator::new().validate(&number(1.0), &schema);
        assert_eq!(report.errors[0].keyword, "$ref");
    }

    #[test]
    fn direct_cycle_is_reported_not_recursed() {
        let schema = Schema::handle(json!({"$ref": "#"})).unwrap();
        let report = Validator::new().validate(&number(1.0), &schema);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.keyword == "$refCycle"));
    }

    #[test]
    fn indirect_cycle_is_reported_not_recursed() {
        let schema = Schema::handle(json!({
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"$ref": "#/definitions/a"}
            },
            "$ref": "#/definitions/a"
        }))
        .unwrap();
        let report = Validator::new().validate(&number(1.0), &schema);
        assert!(report.errors.iter().any(|e| e.keyword == "$refCycle"));
    }

    #[test]
    fn diamond_reuse_is_not_a_cycle() {
        // The same target referenced from two sibling branches is fine;
        // only nested re-entry is cyclic.
        let schema = Schema::handle(json!({
            "definitions": {"pos": {"minimum": 0}},
            "allOf": [
                {"$ref": "#/definitions/pos"},
                {"$ref": "#/definitions/pos"}
            ]
        }))
        .unwrap();
        assert!(Validator::new().validate(&number(5.0), &schema).valid);
    }
}
