//! The schema model.
//!
//! A schema is either one of the two boolean literals (`true` accepts
//! everything, `false` accepts nothing) or a JSON object whose entries
//! are keywords. The model keeps the raw keyword map: which keywords are
//! recognized is the compiler's concern, and unknown keywords must
//! survive parsing so they can be tolerated rather than rejected.
//!
//! Identity, not structure, is what the engine caches by: a
//! [`SchemaHandle`] is an `Arc<Schema>`, and two structurally identical
//! handles compile independently. Callers reuse handles across validation
//! calls to benefit from caching.

pub mod pointer;
mod store;

pub use store::SchemaStore;

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Shared, immutable schema reference — the unit of cache identity.
pub type SchemaHandle = Arc<Schema>;

/// Error for schema input that is not schema-shaped at all.
///
/// This is the programmer-error class: a broken caller, not a data
/// validation outcome, and the only failure this crate propagates as a
/// `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The value was neither a JSON object nor a boolean.
    #[error("schema must be an object or a boolean, got {found}")]
    InvalidShape {
        /// JSON kind of the offending value.
        found: &'static str,
    },
}

/// A schema definition: a boolean literal or a keyword map.
#[derive(Debug, Clone)]
pub enum Schema {
    /// `true` validates everything; `false` validates nothing.
    Bool(bool),
    /// An object schema: keyword name → keyword value, unknown keywords
    /// included.
    Object(Map<String, Value>),
}

impl Schema {
    /// Parses a JSON value into a schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::InvalidShape`] when the value is neither an object
    /// nor a boolean.
    pub fn parse(value: Value) -> Result<Self, SchemaError> {
        match value {
            Value::Bool(accept) => Ok(Self::Bool(accept)),
            Value::Object(keywords) => Ok(Self::Object(keywords)),
            other => Err(SchemaError::InvalidShape {
                found: json_kind(&other),
            }),
        }
    }

    /// Parses a JSON value straight into a shared handle.
    pub fn handle(value: Value) -> Result<SchemaHandle, SchemaError> {
        Ok(Arc::new(Self::parse(value)?))
    }

    /// Converts a nested keyword value into a handle, if it is
    /// schema-shaped. Factories use this for `properties` members,
    /// `items`, combinator branches, and the like; `None` means the
    /// nested value is malformed and the enclosing keyword degrades.
    #[must_use]
    pub fn subschema(value: &Value) -> Option<SchemaHandle> {
        Self::parse(value.clone()).ok().map(Arc::new)
    }

    /// The raw keyword map of an object schema.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(keywords) => Some(keywords),
            Self::Bool(_) => None,
        }
    }

    /// Looks up a keyword's raw value.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|keywords| keywords.get(name))
    }

    /// Resolves a `#`-fragment JSON pointer (e.g. `/definitions/row`)
    /// against this schema, returning the nested definition as a handle.
    ///
    /// Returns `None` for dangling pointers and for targets that are not
    /// schema-shaped. Identity memoization lives in the compiler, not
    /// here: calling this twice yields two distinct handles.
    #[must_use]
    pub fn resolve_pointer(&self, fragment: &str) -> Option<SchemaHandle> {
        let keywords = self.as_object()?;
        let mut tokens = fragment.split('/');
        if !tokens.next()?.is_empty() {
            // Fragments are "/"-rooted; anything else is malformed.
            return None;
        }

        let mut current: Option<&Value> = None;
        for raw in tokens {
            let token = pointer::unescape(raw);
            current = Some(match current {
                None => keywords.get(&token)?,
                Some(Value::Object(map)) => map.get(&token)?,
                Some(Value::Array(items)) => items.get(token.parse::<usize>().ok()?)?,
                Some(_) => return None,
            });
        }
        Self::subschema(current?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
