//! Compile-cache benchmarks: cached vs cold compilation, and validation
//! throughput over a wide document.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use trellis_document::{DocumentNode, Span};
use trellis_validator::{Schema, SchemaHandle, Validator};

fn row_schema() -> SchemaHandle {
    Schema::handle(json!({
        "type": "object",
        "required": ["id", "count", "label"],
        "properties": {
            "id": {"type": "string", "pattern": "^[a-z][0-9]+$"},
            "count": {"type": "number", "minimum": 0, "multipleOf": 1},
            "label": {"type": "string", "minLength": 1, "maxLength": 64}
        },
        "additionalProperties": false
    }))
    .unwrap()
}

fn wide_document(rows: usize) -> DocumentNode {
    let span = Span::default;
    DocumentNode::array(
        (0..rows)
            .map(|i| {
                DocumentNode::object(
                    vec![
                        DocumentNode::string(format!("r{i}"), span()).with_name("id"),
                        DocumentNode::number(i as f64, span()).with_name("count"),
                        DocumentNode::string("cell", span()).with_name("label"),
                    ],
                    span(),
                )
            })
            .collect(),
        span(),
    )
}

fn bench_compile_cold(c: &mut Criterion) {
    let validator = Validator::new();
    let schema = row_schema();
    c.bench_function("compile_cold", |b| {
        b.iter(|| {
            validator.compiler().clear_cache();
            black_box(validator.compiler().compile(&schema))
        });
    });
}

fn bench_compile_cached(c: &mut Criterion) {
    let validator = Validator::new();
    let schema = row_schema();
    validator.compiler().compile(&schema);
    c.bench_function("compile_cached", |b| {
        b.iter(|| black_box(validator.compiler().compile(&schema)));
    });
}

fn bench_validate_rows(c: &mut Criterion) {
    let validator = Validator::new();
    let schema = Schema::handle(json!({"items": row_schema_value()})).unwrap();
    let document = wide_document(256);
    c.bench_function("validate_256_rows", |b| {
        b.iter(|| black_box(validator.validate(&document, &schema)));
    });
}

fn row_schema_value() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["id", "count", "label"],
        "properties": {
            "id": {"type": "string"},
            "count": {"type": "number", "minimum": 0},
            "label": {"type": "string", "minLength": 1}
        }
    })
}

criterion_group!(benches, bench_compile_cold, bench_compile_cached, bench_validate_rows);
criterion_main!(benches);
