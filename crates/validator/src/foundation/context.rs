//! Per-run validation configuration.

use std::sync::Arc;

use crate::schema::SchemaStore;

/// Configuration for one validation run.
///
/// Constructed by the caller, passed by reference through the whole
/// recursive evaluation, and never mutated mid-run. The only recognized
/// behavioral switch is [`fail_fast`](Self::with_fail_fast); the optional
/// [`SchemaStore`] serves cross-document `$ref` resolution.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    fail_fast: bool,
    store: Option<Arc<SchemaStore>>,
}

impl ValidationContext {
    /// Creates the default context: collect all errors, no schema store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops each schema's keyword list at its first violation.
    ///
    /// Fail-fast is local to one schema's own keyword list; nested and
    /// sibling schemas elsewhere in the tree still run.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Registers a schema store for resolving non-local `$ref` URIs.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_store(mut self, store: Arc<SchemaStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Whether fail-fast mode is on.
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// The registered schema store, if any.
    #[must_use]
    pub fn store(&self) -> Option<&SchemaStore> {
        self.store.as_deref()
    }
}
