//! Validate a parsed row against a schema and print the diagnostics.
//!
//! Run with: `cargo run -p trellis-validator --example basic_usage`

use serde_json::json;
use trellis_document::{DocumentNode, Position, Span};
use trellis_validator::{Schema, SchemaError, Validator};

fn cell(line: u32, column: u32) -> Span {
    Span::new(Position::new(line, column), Position::new(line, column + 4)).with_source("people.csv")
}

fn main() -> Result<(), SchemaError> {
    let schema = Schema::handle(json!({
        "type": "object",
        "required": ["name", "age"],
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "age": {"type": "number", "minimum": 0, "maximum": 130}
        },
        "additionalProperties": false
    }))?;

    // What a CSV parser front-end would hand us for the row `",151"`.
    let row = DocumentNode::object(
        vec![
            DocumentNode::string("", cell(2, 1)).with_name("name"),
            DocumentNode::number(151.0, cell(2, 3)).with_name("age"),
        ],
        cell(2, 1),
    );

    let validator = Validator::new();
    let report = validator.validate(&row, &schema);

    println!("{report}");
    println!();
    println!(
        "machine-readable: {}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
    Ok(())
}
