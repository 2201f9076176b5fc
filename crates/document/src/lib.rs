//! # trellis-document
//!
//! The document tree model consumed by the Trellis validation engine.
//!
//! A parser front-end (CSV, PSV, TSV, or any other format) turns raw text
//! into a tree of [`DocumentNode`]s; the validator walks that tree without
//! ever touching source text itself. Every node carries its [`NodeKind`],
//! an optional scalar payload, ordered children, and the [`Span`] the
//! parser recorded for it.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_document::{DocumentNode, NodeKind, Span};
//!
//! let span = Span::default();
//! let row = DocumentNode::object(
//!     vec![
//!         DocumentNode::string("alice", span.clone()).with_name("user"),
//!         DocumentNode::number(42.0, span.clone()).with_name("age"),
//!     ],
//!     span,
//! );
//!
//! assert_eq!(row.kind(), NodeKind::Object);
//! assert_eq!(row.property("age").and_then(DocumentNode::as_f64), Some(42.0));
//! ```

mod node;
mod span;

pub use node::{DocumentNode, NodeKind, Scalar};
pub use span::{Position, Span};
