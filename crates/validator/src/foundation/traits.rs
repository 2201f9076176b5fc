//! The core trait every keyword validator implements.

use trellis_document::DocumentNode;

use crate::eval::Frame;
use crate::foundation::ValidationError;

/// One compiled keyword check.
///
/// Units are produced by the keyword factories at compile time, owned by
/// the compiler's cache, and hold no mutable state: a compiled schema can
/// be shared across concurrent validations of different documents.
///
/// # Contract
///
/// - [`applies_to`](Self::applies_to) is a fast filter: a keyword is
///   inert on node kinds it is not defined for (`minimum` on a string
///   node is not an error, it is a no-op).
/// - [`validate`](Self::validate) must re-check the kind guard itself and
///   return no errors on a non-applicable node, so a caller that skips
///   `applies_to` still gets correct results.
/// - Each check yields zero or one error describing the violated
///   constraint; composite keywords recurse through [`Frame::eval`] and
///   bubble the nested errors up unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// struct Minimum { bound: f64 }
///
/// impl KeywordValidator for Minimum {
///     fn keyword(&self) -> &'static str {
///         "minimum"
///     }
///
///     fn applies_to(&self, node: &DocumentNode) -> bool {
///         node.kind() == NodeKind::Number
///     }
///
///     fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
///         let Some(actual) = node.as_f64() else { return Vec::new() };
///         if actual >= self.bound {
///             return Vec::new();
///         }
///         vec![frame.error(node, "minimum", format!("Value must be at least {}", self.bound))]
///     }
/// }
/// ```
pub trait KeywordValidator: Send + Sync {
    /// The schema keyword this unit implements, e.g. `"minimum"`.
    fn keyword(&self) -> &'static str;

    /// Fast applicability filter for the node's kind.
    fn applies_to(&self, node: &DocumentNode) -> bool;

    /// Runs the check, returning zero or one error per constraint.
    ///
    /// The [`Frame`] carries the data pointer, schema path, run
    /// configuration, and the recursion capability for nested schemas.
    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError>;
}
