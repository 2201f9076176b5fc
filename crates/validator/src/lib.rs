//! # trellis-validator
//!
//! A schema-to-validator compiler and execution engine.
//!
//! Given a JSON-Schema-shaped specification, the [`SchemaCompiler`]
//! translates it once into an ordered list of keyword validator units;
//! the recursive evaluator then runs those units against a
//! [`DocumentNode`](trellis_document::DocumentNode) tree produced by an
//! external parser, collecting structured [`ValidationError`]s with
//! JSON-pointer paths and source locations.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use trellis_document::{DocumentNode, Span};
//! use trellis_validator::{Schema, Validator};
//!
//! let schema = Schema::handle(json!({
//!     "type": "number",
//!     "minimum": 0,
//!     "maximum": 10,
//! }))
//! .unwrap();
//!
//! let node = DocumentNode::number(15.0, Span::default());
//! let report = Validator::new().validate(&node, &schema);
//!
//! assert!(!report.valid);
//! assert_eq!(report.errors[0].keyword, "maximum");
//! ```
//!
//! ## Architecture
//!
//! - [`schema`] — the schema model ([`Schema`], [`SchemaHandle`]) plus
//!   JSON-pointer helpers and the [`SchemaStore`] `$ref` registry.
//! - [`compiler`] — keyword dispatch and the identity-keyed compile cache.
//!   Compilation is memoized by schema *handle identity*, not structure;
//!   reuse handles across calls to benefit.
//! - [`keywords`] — one factory per recognized keyword; unknown keywords
//!   are tolerated, malformed keyword values are skipped with a warning.
//! - [`eval`] — the recursion primitive shared by every composite keyword,
//!   including the boolean-schema short circuits and `$ref` cycle guard.
//! - [`engine`] — the [`Validator`] entry point and [`ValidationReport`].

pub mod compiler;
pub mod engine;
pub mod eval;
pub mod foundation;
pub mod keywords;
pub mod prelude;
pub mod schema;

pub use compiler::{CompiledSchema, SchemaCompiler};
pub use engine::{ValidationReport, Validator};
pub use foundation::{KeywordValidator, Params, ValidationContext, ValidationError};
pub use schema::{Schema, SchemaError, SchemaHandle, SchemaStore};
