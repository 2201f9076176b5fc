//! Schema compilation and the identity-keyed compile cache.
//!
//! Compiling a schema means walking the keyword registry in its fixed
//! order and asking each present keyword's factory for a validator unit.
//! The result is cached by the schema handle's identity (the `Arc`
//! pointer), so repeated validation of the same schema against many
//! documents pays for inspection exactly once. Structure is deliberately
//! not the key: deep-equality hashing would cost more than it saves, and
//! callers control identity by reusing handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::foundation::KeywordValidator;
use crate::keywords;
use crate::schema::{Schema, SchemaHandle};

/// Builds the validator unit for one keyword.
///
/// Receives the keyword's own value and the whole keyword map — the
/// latter for keywords coupled to siblings (`if` reads `then`/`else`,
/// `items` reads `additionalItems`). Returns `None` when the keyword
/// value is malformed; the compiler then skips the keyword, degrading
/// validation strength instead of failing compilation.
pub type KeywordFactory =
    fn(&Value, &Map<String, Value>) -> Option<Box<dyn KeywordValidator>>;

/// The compiled form of an object schema: an ordered list of validator
/// units plus a back-reference to the source schema.
///
/// Instances are immutable once built and shared behind `Arc`; concurrent
/// validations of different documents may run the same units in parallel.
pub struct CompiledSchema {
    schema: SchemaHandle,
    units: Vec<Box<dyn KeywordValidator>>,
}

impl CompiledSchema {
    /// The source schema this was compiled from.
    #[must_use]
    pub fn schema(&self) -> &SchemaHandle {
        &self.schema
    }

    /// The validator units, in registry order.
    #[must_use]
    pub fn units(&self) -> &[Box<dyn KeywordValidator>] {
        &self.units
    }

    /// Number of compiled units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when no recognized keyword was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords: Vec<&str> = self.units.iter().map(|u| u.keyword()).collect();
        f.debug_struct("CompiledSchema")
            .field("keywords", &keywords)
            .finish_non_exhaustive()
    }
}

/// A `$ref` resolution memo entry. Holding the base handle pins its
/// allocation, keeping the pointer key valid for the cache's lifetime.
struct Resolution {
    _base: SchemaHandle,
    target: SchemaHandle,
}

/// Compiles schemas and memoizes the results by handle identity.
///
/// The cache is the engine's only shared mutable state. The
/// check-then-insert is not atomic: two threads may compile the same
/// schema concurrently, but the first insert wins and both observe one
/// instance afterwards, so the race wastes work without corrupting
/// anything.
#[derive(Default)]
pub struct SchemaCompiler {
    cache: RwLock<HashMap<usize, Arc<CompiledSchema>>>,
    resolutions: RwLock<HashMap<(usize, String), Resolution>>,
}

impl SchemaCompiler {
    /// Creates a compiler with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles a schema, returning the cached result on a repeat handle.
    ///
    /// Boolean schemas are intercepted by the evaluator and never reach
    /// this point during normal operation; passed directly, they compile
    /// to an empty unit list.
    pub fn compile(&self, schema: &SchemaHandle) -> Arc<CompiledSchema> {
        let key = Arc::as_ptr(schema) as usize;
        if let Some(hit) = self.cache.read().get(&key) {
            trace!(key, "compile cache hit");
            return Arc::clone(hit);
        }

        let compiled = Arc::new(self.build(schema));
        let mut cache = self.cache.write();
        let entry = cache.entry(key).or_insert(compiled);
        Arc::clone(entry)
    }

    fn build(&self, schema: &SchemaHandle) -> CompiledSchema {
        let mut units: Vec<Box<dyn KeywordValidator>> = Vec::new();
        if let Schema::Object(object) = schema.as_ref() {
            for &(name, factory) in keywords::registry() {
                let Some(value) = object.get(name) else {
                    continue;
                };
                match factory(value, object) {
                    Some(unit) => units.push(unit),
                    None => warn!(keyword = name, "ignoring malformed keyword value"),
                }
            }
            debug!(units = units.len(), "compiled schema");
        }
        CompiledSchema {
            schema: Arc::clone(schema),
            units,
        }
    }

    /// Drops all cached compilations and `$ref` resolutions. Used when
    /// schemas are hot-reloaded, and by tests for isolation.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
        self.resolutions.write().clear();
    }

    /// Number of cached compilations. Diagnostics only; not part of the
    /// validation contract.
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.read().len()
    }

    /// Resolves a `#`-fragment against a base schema, memoized per
    /// `(base identity, fragment)`.
    ///
    /// The memo is what gives a reference target a *stable* identity:
    /// without it, every expansion of `"$ref": "#/definitions/x"` would
    /// mint a fresh handle, the compile cache would never hit, and the
    /// cycle guard — which compares identities — could never terminate a
    /// self-referential chain.
    pub fn resolve_fragment(&self, base: &SchemaHandle, fragment: &str) -> Option<SchemaHandle> {
        if fragment.is_empty() {
            return Some(Arc::clone(base));
        }

        let key = (Arc::as_ptr(base) as usize, fragment.to_owned());
        if let Some(hit) = self.resolutions.read().get(&key) {
            return Some(Arc::clone(&hit.target));
        }

        let target = base.resolve_pointer(fragment)?;
        let mut resolutions = self.resolutions.write();
        let entry = resolutions.entry(key).or_insert(Resolution {
            _base: Arc::clone(base),
            target,
        });
        Some(Arc::clone(&entry.target))
    }
}

impl fmt::Debug for SchemaCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCompiler")
            .field("cache_size", &self.cache_size())
            .finish_non_exhaustive()
    }
}
