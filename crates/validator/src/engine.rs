//! The top-level validation orchestrator.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use trellis_document::DocumentNode;

use crate::compiler::SchemaCompiler;
use crate::eval::{self, EvalCache, Frame};
use crate::foundation::{ValidationContext, ValidationError};
use crate::schema::SchemaHandle;

/// Outcome of one validation run.
///
/// A run always completes and always yields a report: "fails" only in
/// the boolean sense of `valid`, never as exceptional control flow.
/// Serializes directly for machine-readable output; `Display` renders
/// one diagnostic line per error for CLI consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// True when no violations were found.
    pub valid: bool,
    /// Every violation, in evaluation order.
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "document is valid");
        }
        writeln!(f, "{} violation(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {error}")?;
        }
        Ok(())
    }
}

/// The validation entry point.
///
/// Owns the schema compiler and its identity-keyed cache, so reusing one
/// `Validator` across documents amortizes schema compilation. Validation
/// itself is pure tree traversal; a `Validator` can serve concurrent
/// runs from multiple threads.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use trellis_document::{DocumentNode, Span};
/// use trellis_validator::{Schema, Validator};
///
/// let schema = Schema::handle(json!({"minimum": 0})).unwrap();
/// let node = DocumentNode::number(-1.0, Span::default());
///
/// let report = Validator::new().validate(&node, &schema);
/// assert!(!report.valid);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    compiler: SchemaCompiler,
}

impl Validator {
    /// Creates a validator with an empty compile cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiler backing this validator, for cache introspection and
    /// explicit `clear_cache` on schema hot-reload.
    #[must_use]
    pub fn compiler(&self) -> &SchemaCompiler {
        &self.compiler
    }

    /// Validates a document against a schema with default options
    /// (collect all errors).
    pub fn validate(&self, root: &DocumentNode, schema: &SchemaHandle) -> ValidationReport {
        self.validate_with(root, schema, &ValidationContext::default())
    }

    /// Validates a document against a schema with explicit options.
    ///
    /// Evaluation starts at pointer `"/"` and schema path `"/"`; the
    /// per-run result memo lives and dies with this call.
    pub fn validate_with(
        &self,
        root: &DocumentNode,
        schema: &SchemaHandle,
        ctx: &ValidationContext,
    ) -> ValidationReport {
        let cache = EvalCache::new();
        let frame = Frame::root_frame(schema, ctx, &self.compiler, &cache);
        let errors = eval::validate_against_schema(root, schema, &frame);
        debug!(
            errors = errors.len(),
            fail_fast = ctx.fail_fast(),
            memo_hits = cache.stats().hits,
            "validation finished"
        );
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}
