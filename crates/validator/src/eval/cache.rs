//! Per-run memo of evaluation outcomes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

use trellis_document::DocumentNode;

use crate::foundation::ValidationError;
use crate::schema::SchemaHandle;

/// Memoizes `(schema, node) → errors` within one validation run.
///
/// Overlapping `$ref` targets and combinator branches can evaluate the
/// same pair more than once; the memo turns the repeats into clones.
///
/// Keys are raw addresses, which is sound only because both the schema
/// handles and the document tree outlive the run that owns this cache —
/// the cache must never outlive the run, so the orchestrator creates a
/// fresh one per call.
#[derive(Debug, Default)]
pub struct EvalCache {
    entries: RefCell<HashMap<(usize, usize), Vec<ValidationError>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl EvalCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(
        &self,
        schema: &SchemaHandle,
        node: &DocumentNode,
    ) -> Option<Vec<ValidationError>> {
        match self.entries.borrow().get(&Self::key(schema, node)) {
            Some(errors) => {
                self.hits.set(self.hits.get() + 1);
                Some(errors.clone())
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    pub(crate) fn insert(
        &self,
        schema: &SchemaHandle,
        node: &DocumentNode,
        errors: &[ValidationError],
    ) {
        self.entries
            .borrow_mut()
            .insert(Self::key(schema, node), errors.to_vec());
    }

    /// Hit/miss counters for diagnostics.
    #[must_use]
    pub fn stats(&self) -> EvalCacheStats {
        EvalCacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            entries: self.entries.borrow().len(),
        }
    }

    fn key(schema: &SchemaHandle, node: &DocumentNode) -> (usize, usize) {
        (
            Arc::as_ptr(schema) as usize,
            std::ptr::from_ref(node) as usize,
        )
    }
}

/// Snapshot of the memo's counters.
#[derive(Debug, Clone, Copy)]
pub struct EvalCacheStats {
    /// Lookups answered from the memo.
    pub hits: u64,
    /// Lookups that fell through to evaluation.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

impl EvalCacheStats {
    /// Fraction of lookups answered from the memo, 0.0 when idle.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;
    use trellis_document::Span;

    #[test]
    fn miss_then_hit() {
        let cache = EvalCache::new();
        let schema = Schema::handle(json!({"type": "number"})).unwrap();
        let node = DocumentNode::number(1.0, Span::default());

        assert!(cache.get(&schema, &node).is_none());
        cache.insert(&schema, &node, &[]);
        assert_eq!(cache.get(&schema, &node).map(|errors| errors.len()), Some(0));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn distinct_nodes_do_not_collide() {
        let cache = EvalCache::new();
        let schema = Schema::handle(json!({"type": "number"})).unwrap();
        let a = DocumentNode::number(1.0, Span::default());
        let b = DocumentNode::number(1.0, Span::default());

        cache.insert(&schema, &a, &[]);
        assert!(cache.get(&schema, &b).is_none());
    }

    #[test]
    fn hit_rate_is_zero_when_idle() {
        let cache = EvalCache::new();
        assert!(cache.stats().hit_rate().abs() < f64::EPSILON);
    }
}
