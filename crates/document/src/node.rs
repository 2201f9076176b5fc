//! The parsed document tree.

use std::fmt;

use crate::span::Span;

/// Discriminant of a [`DocumentNode`].
///
/// The kind fully determines which schema keywords can apply to a node; a
/// keyword validator is inert on kinds it is not defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An explicit null / missing value.
    Null,
    /// A boolean scalar.
    Boolean,
    /// A numeric scalar. All numbers are carried as `f64`.
    Number,
    /// A text scalar.
    String,
    /// An ordered sequence of child nodes.
    Array,
    /// A collection of named child nodes.
    Object,
}

impl NodeKind {
    /// The canonical discriminant name, as emitted by parser front-ends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Array => "Array",
            Self::Object => "Object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar payload of a leaf node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean payload.
    Bool(bool),
    /// Numeric payload. JSON numbers are floating point.
    Number(f64),
    /// Text payload.
    Text(String),
}

impl Scalar {
    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// A node in the parsed document tree.
///
/// Nodes are built by a parser front-end and are immutable from the
/// validator's point of view: the engine only reads `kind`, `value`,
/// `children`, and `span`.
///
/// Object members are children carrying a `name`; array elements are
/// unnamed children in source order.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    kind: NodeKind,
    name: Option<String>,
    value: Option<Scalar>,
    children: Vec<DocumentNode>,
    span: Span,
}

impl DocumentNode {
    /// Creates a null node.
    #[must_use]
    pub fn null(span: Span) -> Self {
        Self {
            kind: NodeKind::Null,
            name: None,
            value: None,
            children: Vec::new(),
            span,
        }
    }

    /// Creates a boolean node.
    #[must_use]
    pub fn boolean(value: bool, span: Span) -> Self {
        Self {
            kind: NodeKind::Boolean,
            name: None,
            value: Some(Scalar::Bool(value)),
            children: Vec::new(),
            span,
        }
    }

    /// Creates a number node.
    #[must_use]
    pub fn number(value: f64, span: Span) -> Self {
        Self {
            kind: NodeKind::Number,
            name: None,
            value: Some(Scalar::Number(value)),
            children: Vec::new(),
            span,
        }
    }

    /// Creates a string node.
    #[must_use]
    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Self {
            kind: NodeKind::String,
            name: None,
            value: Some(Scalar::Text(value.into())),
            children: Vec::new(),
            span,
        }
    }

    /// Creates an array node from its elements, in source order.
    #[must_use]
    pub fn array(children: Vec<DocumentNode>, span: Span) -> Self {
        Self {
            kind: NodeKind::Array,
            name: None,
            value: None,
            children,
            span,
        }
    }

    /// Creates an object node from its members.
    ///
    /// Members are expected to carry a `name` (see [`with_name`]); unnamed
    /// members are kept but unreachable through [`property`].
    ///
    /// [`with_name`]: DocumentNode::with_name
    /// [`property`]: DocumentNode::property
    #[must_use]
    pub fn object(members: Vec<DocumentNode>, span: Span) -> Self {
        Self {
            kind: NodeKind::Object,
            name: None,
            value: None,
            children: members,
            span,
        }
    }

    /// Tags this node with a member name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The node's discriminant.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The member name, when this node is an object member.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The scalar payload, when this is a leaf node.
    #[must_use]
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// Ordered children of a composite node. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// The source range the parser recorded for this node.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Looks up an object member by name. Returns the first match.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&DocumentNode> {
        self.children
            .iter()
            .find(|child| child.name.as_deref() == Some(name))
    }

    /// Shortcut for the numeric payload.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_ref().and_then(Scalar::as_f64)
    }

    /// Shortcut for the text payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Scalar::as_str)
    }

    /// Shortcut for the boolean payload.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(Scalar::as_bool)
    }

    /// Structural value equality, ignoring spans and member names at the
    /// top level.
    ///
    /// Arrays compare element-wise in order; objects compare by member
    /// name regardless of order. Numbers compare as `f64`.
    #[must_use]
    pub fn value_eq(&self, other: &DocumentNode) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match self.kind {
            NodeKind::Null => true,
            NodeKind::Boolean | NodeKind::Number | NodeKind::String => self.value == other.value,
            NodeKind::Array => {
                self.children.len() == other.children.len()
                    && self
                        .children
                        .iter()
                        .zip(&other.children)
                        .all(|(a, b)| a.value_eq(b))
            }
            NodeKind::Object => {
                self.children.len() == other.children.len()
                    && self.children.iter().all(|member| {
                        member.name().is_some_and(|name| {
                            other
                                .property(name)
                                .is_some_and(|counterpart| member.value_eq(counterpart))
                        })
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;
    use pretty_assertions::assert_eq;

    fn span() -> Span {
        Span::default()
    }

    #[test]
    fn scalar_accessors() {
        let node = DocumentNode::number(2.5, span());
        assert_eq!(node.kind(), NodeKind::Number);
        assert_eq!(node.as_f64(), Some(2.5));
        assert_eq!(node.as_str(), None);
    }

    #[test]
    fn property_lookup() {
        let row = DocumentNode::object(
            vec![
                DocumentNode::string("a", span()).with_name("first"),
                DocumentNode::string("b", span()).with_name("second"),
            ],
            span(),
        );
        assert_eq!(row.property("second").and_then(DocumentNode::as_str), Some("b"));
        assert!(row.property("third").is_none());
    }

    #[test]
    fn value_eq_scalars() {
        assert!(DocumentNode::number(1.0, span()).value_eq(&DocumentNode::number(1.0, span())));
        assert!(!DocumentNode::number(1.0, span()).value_eq(&DocumentNode::number(2.0, span())));
        assert!(!DocumentNode::number(1.0, span()).value_eq(&DocumentNode::string("1", span())));
    }

    #[test]
    fn value_eq_ignores_span_and_name() {
        let a = DocumentNode::string("x", Span::new(Position::new(1, 1), Position::new(1, 2)))
            .with_name("col");
        let b = DocumentNode::string("x", span());
        assert!(a.value_eq(&b));
    }

    #[test]
    fn value_eq_arrays_are_ordered() {
        let a = DocumentNode::array(
            vec![DocumentNode::number(1.0, span()), DocumentNode::number(2.0, span())],
            span(),
        );
        let b = DocumentNode::array(
            vec![DocumentNode::number(2.0, span()), DocumentNode::number(1.0, span())],
            span(),
        );
        assert!(!a.value_eq(&b));
        assert!(a.value_eq(&a.clone()));
    }

    #[test]
    fn value_eq_objects_ignore_member_order() {
        let a = DocumentNode::object(
            vec![
                DocumentNode::number(1.0, span()).with_name("x"),
                DocumentNode::number(2.0, span()).with_name("y"),
            ],
            span(),
        );
        let b = DocumentNode::object(
            vec![
                DocumentNode::number(2.0, span()).with_name("y"),
                DocumentNode::number(1.0, span()).with_name("x"),
            ],
            span(),
        );
        assert!(a.value_eq(&b));
    }
}
