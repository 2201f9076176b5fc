//! Common imports for working with the validation engine.
//!
//! ```rust
//! use trellis_validator::prelude::*;
//!
//! let schema = Schema::handle(serde_json::json!({"type": "string"})).unwrap();
//! let node = DocumentNode::string("hello", Span::default());
//! assert!(Validator::new().validate(&node, &schema).valid);
//! ```

pub use trellis_document::{DocumentNode, NodeKind, Position, Scalar, Span};

pub use crate::compiler::{CompiledSchema, SchemaCompiler};
pub use crate::engine::{ValidationReport, Validator};
pub use crate::eval::{EvalCache, EvalCacheStats, Frame, validate_against_schema};
pub use crate::foundation::{KeywordValidator, Params, ValidationContext, ValidationError};
pub use crate::schema::{Schema, SchemaError, SchemaHandle, SchemaStore};
