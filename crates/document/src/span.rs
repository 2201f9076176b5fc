//! Source locations recorded by the parser.
//!
//! Spans are owned by the parsing front-end and are read-only to the
//! validator; they travel unchanged into validation errors so diagnostics
//! can point back at the offending text.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// A position in the source text. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range with an optional source tag.
///
/// The source tag is typically a file name or stream identifier; it is
/// shared (`Arc<str>`) because every node of a parsed document points at
/// the same source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start of the range.
    pub start: Position,
    /// End of the range.
    pub end: Position,
    /// Origin of the text, e.g. a file name. `None` for anonymous input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Arc<str>>,
}

impl Span {
    /// Creates a span between two positions.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            source: None,
        }
    }

    /// Attaches a source tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{source}:")?;
        }
        write!(f, "{}", self.start)
    }
}
