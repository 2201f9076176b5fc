//! Local registry for cross-document `$ref` resolution.
//!
//! References are resolved entirely from schemas registered up front;
//! resolution never touches the network. A URI that was not registered
//! simply fails to resolve and is reported by the `$ref` validator.

use std::collections::HashMap;

use super::SchemaHandle;

/// Maps `$ref` base URIs to schema handles.
///
/// Registered handles are returned as-is, so every resolution of the same
/// URI observes the same identity — which is what lets the compile cache
/// and the cycle guard work across documents.
#[derive(Debug, Default)]
pub struct SchemaStore {
    schemas: HashMap<String, SchemaHandle>,
}

impl SchemaStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under a base URI, replacing any previous entry.
    pub fn register(&mut self, uri: impl Into<String>, schema: SchemaHandle) {
        self.schemas.insert(uri.into(), schema);
    }

    /// Looks up a registered schema by its exact base URI.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<SchemaHandle> {
        self.schemas.get(uri).cloned()
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
