//! Recursive schema evaluation.
//!
//! "Validate this node against this schema definition" is a single
//! primitive, reused at every nesting level: object `properties`, array
//! `items`, the combinators, conditionals, and `$ref` all call back into
//! [`validate_against_schema`] through the [`Frame`] they receive. This
//! keeps composite keywords free of evaluation logic of their own and
//! avoids a circular dependency between the compiler and the factories.

mod cache;

pub use cache::{EvalCache, EvalCacheStats};

use std::sync::Arc;

use trellis_document::DocumentNode;

use crate::compiler::SchemaCompiler;
use crate::foundation::{ValidationContext, ValidationError};
use crate::schema::{Schema, SchemaHandle, pointer};

/// One link in the chain of `$ref` targets currently being expanded.
///
/// The chain is a parent-pointer list threaded through frames: each
/// expansion extends it on the stack, so membership tests walk at most
/// the current expansion depth and nothing is ever mutated.
#[derive(Debug, Clone, Copy)]
struct RefLink<'a> {
    target: usize,
    parent: Option<&'a RefLink<'a>>,
}

impl RefLink<'_> {
    fn contains(&self, target: usize) -> bool {
        self.target == target || self.parent.is_some_and(|parent| parent.contains(target))
    }
}

/// Evaluation scope for one (node, schema) pair.
///
/// Borrows everything a keyword validator may need: the JSON pointer into
/// the data, the schema path, the run configuration, the compiler, the
/// per-run memo, and the active-`$ref` chain. `Frame::eval` is the
/// recursion capability handed to every validator unit.
pub struct Frame<'a> {
    pointer: &'a str,
    schema_path: &'a str,
    root: &'a SchemaHandle,
    ctx: &'a ValidationContext,
    compiler: &'a SchemaCompiler,
    cache: &'a EvalCache,
    refs: Option<&'a RefLink<'a>>,
}

impl<'a> Frame<'a> {
    pub(crate) fn root_frame(
        root: &'a SchemaHandle,
        ctx: &'a ValidationContext,
        compiler: &'a SchemaCompiler,
        cache: &'a EvalCache,
    ) -> Self {
        Self {
            pointer: "/",
            schema_path: "/",
            root,
            ctx,
            compiler,
            cache,
            refs: None,
        }
    }

    /// JSON pointer into the data for the node under evaluation.
    #[must_use]
    pub fn pointer(&self) -> &str {
        self.pointer
    }

    /// JSON pointer into the schema for the definition under evaluation.
    #[must_use]
    pub fn schema_path(&self) -> &str {
        self.schema_path
    }

    /// Whether this run stops a schema's keyword list at its first
    /// violation.
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.ctx.fail_fast()
    }

    /// The compiler serving this run.
    #[must_use]
    pub fn compiler(&self) -> &SchemaCompiler {
        self.compiler
    }

    /// Builds an error anchored at this frame's data pointer, with the
    /// schema path qualified down to `keyword` and the node's span
    /// attached.
    #[must_use]
    pub fn error(
        &self,
        node: &DocumentNode,
        keyword: &'static str,
        message: impl Into<String>,
    ) -> ValidationError {
        ValidationError::new(keyword, message)
            .with_pointer(self.pointer.to_owned())
            .with_schema_path(pointer::join(self.schema_path, keyword))
            .with_span(node.span().clone())
    }

    /// The recursion primitive: validates `node` against a nested schema
    /// at a deeper pointer / schema path.
    #[must_use]
    pub fn eval(
        &self,
        node: &DocumentNode,
        schema: &SchemaHandle,
        pointer: &str,
        schema_path: &str,
    ) -> Vec<ValidationError> {
        let child = Frame {
            pointer,
            schema_path,
            root: self.root,
            ctx: self.ctx,
            compiler: self.compiler,
            cache: self.cache,
            refs: self.refs,
        };
        validate_against_schema(node, schema, &child)
    }

    /// Like [`eval`](Self::eval), but records `target` as an active
    /// reference expansion so cyclic `$ref` chains are caught by
    /// [`in_ref_chain`](Self::in_ref_chain) instead of recursing
    /// unboundedly.
    #[must_use]
    pub fn eval_ref(
        &self,
        node: &DocumentNode,
        target: &SchemaHandle,
        schema_path: &str,
    ) -> Vec<ValidationError> {
        let link = RefLink {
            target: Arc::as_ptr(target) as usize,
            parent: self.refs,
        };
        let child = Frame {
            pointer: self.pointer,
            schema_path,
            root: self.root,
            ctx: self.ctx,
            compiler: self.compiler,
            cache: self.cache,
            refs: Some(&link),
        };
        validate_against_schema(node, target, &child)
    }

    /// True when `target` is already being expanded higher up the stack.
    #[must_use]
    pub fn in_ref_chain(&self, target: &SchemaHandle) -> bool {
        let ptr = Arc::as_ptr(target) as usize;
        self.refs.is_some_and(|chain| chain.contains(ptr))
    }

    /// Resolves a `$ref` value to a schema handle.
    ///
    /// `#`-only and `#/…` references resolve against the run's root
    /// schema; references with a non-empty base URI go through the
    /// context's [`SchemaStore`](crate::schema::SchemaStore). `None`
    /// means the reference dangles and the `$ref` validator reports it.
    #[must_use]
    pub fn resolve_reference(&self, reference: &str) -> Option<SchemaHandle> {
        let (base, fragment) = match reference.split_once('#') {
            Some((base, fragment)) => (base, fragment),
            None => (reference, ""),
        };
        let base_handle = if base.is_empty() {
            Arc::clone(self.root)
        } else {
            self.ctx.store()?.resolve(base)?
        };
        self.compiler.resolve_fragment(&base_handle, fragment)
    }
}

/// Validates a node against a schema definition.
///
/// The decision tree per call:
///
/// 1. boolean `false` — exactly one synthetic error (keyword `"false"`),
///    independent of node content;
/// 2. boolean `true` — no errors, the node is not inspected;
/// 3. object schema — compile (cached by identity), run each unit in
///    registry order, skipping units whose `applies_to` rejects the node;
///    under fail-fast, stop this schema's unit list at the first unit
///    that produced errors. Recursion into nested schemas elsewhere is
///    unaffected.
#[must_use]
pub fn validate_against_schema(
    node: &DocumentNode,
    schema: &SchemaHandle,
    frame: &Frame<'_>,
) -> Vec<ValidationError> {
    match schema.as_ref() {
        Schema::Bool(true) => Vec::new(),
        Schema::Bool(false) => vec![
            ValidationError::new("false", "Schema is `false`; no value is permitted")
                .with_pointer(frame.pointer().to_owned())
                .with_schema_path(frame.schema_path().to_owned())
                .with_span(node.span().clone()),
        ],
        Schema::Object(_) => {
            if let Some(memoized) = frame.cache.get(schema, node) {
                return memoized;
            }

            let compiled = frame.compiler.compile(schema);
            let mut errors = Vec::new();
            for unit in compiled.units() {
                if !unit.applies_to(node) {
                    continue;
                }
                let unit_errors = unit.validate(node, frame);
                let failed = !unit_errors.is_empty();
                errors.extend(unit_errors);
                if failed && frame.fail_fast() {
                    break;
                }
            }

            // Cycle reports depend on the active reference chain; only
            // chain-independent outcomes are memoized.
            if errors.iter().all(|e| e.keyword != "$refCycle") {
                frame.cache.insert(schema, node, &errors);
            }
            errors
        }
    }
}
