//! The `if`/`then`/`else` conditional keyword.
//!
//! The three keywords compile to one unit anchored at `if`; `then` and
//! `else` alone are inert and have no registry rows. The condition is a
//! probe: its errors are never reported, they only select the branch.

use serde_json::{Map, Value};
use trellis_document::DocumentNode;

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};
use crate::schema::{Schema, SchemaHandle, pointer};

/// Applies `then` when the node matches the `if` schema, `else` when it
/// does not. A missing branch validates trivially.
#[derive(Debug)]
pub struct IfThenElse {
    condition: SchemaHandle,
    then_branch: Option<SchemaHandle>,
    else_branch: Option<SchemaHandle>,
}

impl KeywordValidator for IfThenElse {
    fn keyword(&self) -> &'static str {
        "if"
    }

    fn applies_to(&self, _node: &DocumentNode) -> bool {
        true
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let condition_path = pointer::join(frame.schema_path(), "if");
        let holds = frame
            .eval(node, &self.condition, frame.pointer(), &condition_path)
            .is_empty();

        let (branch, keyword) = if holds {
            (&self.then_branch, "then")
        } else {
            (&self.else_branch, "else")
        };
        match branch {
            Some(schema) => {
                let schema_path = pointer::join(frame.schema_path(), keyword);
                frame.eval(node, schema, frame.pointer(), &schema_path)
            }
            None => Vec::new(),
        }
    }
}

pub(crate) fn if_factory(
    value: &Value,
    schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let then_branch = schema.get("then").and_then(Schema::subschema);
    let else_branch = schema.get("else").and_then(Schema::subschema);
    if then_branch.is_none() && else_branch.is_none() {
        // A lone `if` constrains nothing.
        return None;
    }
    Some(Box::new(IfThenElse {
        condition: Schema::subschema(value)?,
        then_branch,
        else_branch,
    }))
}
