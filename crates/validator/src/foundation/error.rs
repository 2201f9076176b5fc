//! Structured validation errors.
//!
//! A schema violation is data, not control flow: validators return
//! [`ValidationError`] values and the engine aggregates them into a
//! report. Nothing in this module is ever thrown across the validation
//! boundary.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use trellis_document::Span;

/// Keyword-specific structured detail attached to an error.
///
/// Most keywords attach one or two params (e.g. `minimum` and `actual`),
/// so the backing storage is a small vector that only spills to the heap
/// for unusually rich errors. Serializes as a JSON map.
#[derive(Debug, Clone, Default)]
pub struct Params(SmallVec<[(Cow<'static, str>, Value); 2]>);

impl Params {
    /// Creates an empty param set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a param. Later entries with the same key shadow earlier ones
    /// on lookup but both are serialized; keywords do not reuse keys.
    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    /// Looks up a param by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }

    /// Number of params.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no params were attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A single schema violation.
///
/// Carries everything a consumer needs to navigate back to both sides of
/// the failure: `pointer` locates the offending value in the *data*,
/// `schema_path` locates the clause in the *schema*, and `span` is the
/// source range the parser recorded for the node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// The keyword that produced the error, e.g. `"minimum"`. Synthetic
    /// keywords exist for the `false` boolean schema (`"false"`) and for
    /// cyclic references (`"$refCycle"`).
    pub keyword: Cow<'static, str>,

    /// Human-readable description with the offending value embedded.
    pub message: String,

    /// JSON pointer into the validated data. `"/"` for the document root.
    pub pointer: String,

    /// JSON pointer into the schema, fully qualified down to the keyword.
    pub schema_path: String,

    /// Source range of the offending node, when the parser recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// Keyword-specific structured detail for programmatic consumers.
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

impl ValidationError {
    /// Creates an error for a keyword. Pointer and schema path default to
    /// the document root; the evaluator fills them in via the builder
    /// methods.
    pub fn new(keyword: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            message: message.into(),
            pointer: "/".to_owned(),
            schema_path: "/".to_owned(),
            span: None,
            params: Params::new(),
        }
    }

    /// Sets the JSON pointer into the data.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = pointer.into();
        self
    }

    /// Sets the JSON pointer into the schema.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_schema_path(mut self, schema_path: impl Into<String>) -> Self {
        self.schema_path = schema_path.into();
        self
    }

    /// Attaches the source range of the offending node.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Adds a structured param.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Looks up a param by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{span} ")?;
        }
        write!(f, "{}: {} ({})", self.pointer, self.message, self.keyword)
    }
}

impl std::error::Error for ValidationError {}
