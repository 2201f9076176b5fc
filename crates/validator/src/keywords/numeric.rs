//! Numeric keyword validators.

use serde_json::{Map, Value};
use trellis_document::{DocumentNode, NodeKind};

use crate::eval::Frame;
use crate::foundation::{KeywordValidator, ValidationError};

/// Absolute tolerance for the `multipleOf` quotient check.
///
/// JSON numbers are floating point: `0.3 / 0.1` is not exactly `3`, so an
/// exact modulo would reject values the schema author clearly intended to
/// admit. Whether this should scale with operand magnitude is an open
/// precision-policy question; the absolute constant matches the observed
/// behavior of the format this engine validates.
const MULTIPLE_OF_TOLERANCE: f64 = 1e-10;

/// Which side and inclusivity a [`Bound`] enforces.
#[derive(Debug, Clone, Copy)]
enum BoundKind {
    /// `minimum` — inclusive lower bound.
    Minimum,
    /// `maximum` — inclusive upper bound.
    Maximum,
    /// `exclusiveMinimum` — strict lower bound.
    ExclusiveMinimum,
    /// `exclusiveMaximum` — strict upper bound.
    ExclusiveMaximum,
}

impl BoundKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
        }
    }

    fn holds(self, actual: f64, bound: f64) -> bool {
        match self {
            Self::Minimum => actual >= bound,
            Self::Maximum => actual <= bound,
            Self::ExclusiveMinimum => actual > bound,
            Self::ExclusiveMaximum => actual < bound,
        }
    }

    fn describe(self, bound: f64) -> String {
        match self {
            Self::Minimum => format!("Value must be at least {bound}"),
            Self::Maximum => format!("Value must be at most {bound}"),
            Self::ExclusiveMinimum => format!("Value must be greater than {bound}"),
            Self::ExclusiveMaximum => format!("Value must be less than {bound}"),
        }
    }
}

/// Validates a numeric bound (`minimum`, `maximum`, and their exclusive
/// variants). Direct comparison, no tolerance: bounds are exact by
/// JSON-Schema semantics.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    kind: BoundKind,
    bound: f64,
}

impl KeywordValidator for Bound {
    fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Number
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        // Kind guard re-checked: `validate` stays a no-op on non-numeric
        // nodes even when called without `applies_to`.
        let Some(actual) = node.as_f64() else {
            return Vec::new();
        };
        if self.kind.holds(actual, self.bound) {
            return Vec::new();
        }
        vec![
            frame
                .error(node, self.kind.keyword(), self.kind.describe(self.bound))
                .with_param(self.kind.keyword(), self.bound)
                .with_param("actual", actual),
        ]
    }
}

/// Validates that a number is a multiple of the given divisor, within
/// [`MULTIPLE_OF_TOLERANCE`] of an integral quotient.
#[derive(Debug, Clone, Copy)]
pub struct MultipleOf {
    divisor: f64,
}

impl KeywordValidator for MultipleOf {
    fn keyword(&self) -> &'static str {
        "multipleOf"
    }

    fn applies_to(&self, node: &DocumentNode) -> bool {
        node.kind() == NodeKind::Number
    }

    fn validate(&self, node: &DocumentNode, frame: &Frame<'_>) -> Vec<ValidationError> {
        let Some(actual) = node.as_f64() else {
            return Vec::new();
        };
        let quotient = actual / self.divisor;
        if (quotient - quotient.round()).abs() < MULTIPLE_OF_TOLERANCE {
            return Vec::new();
        }
        vec![
            frame
                .error(
                    node,
                    "multipleOf",
                    format!("Value {actual} is not a multiple of {}", self.divisor),
                )
                .with_param("multipleOf", self.divisor)
                .with_param("actual", actual),
        ]
    }
}

fn bound_factory(kind: BoundKind, value: &Value) -> Option<Box<dyn KeywordValidator>> {
    Some(Box::new(Bound {
        kind,
        bound: value.as_f64()?,
    }))
}

pub(crate) fn minimum_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    bound_factory(BoundKind::Minimum, value)
}

pub(crate) fn maximum_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    bound_factory(BoundKind::Maximum, value)
}

pub(crate) fn exclusive_minimum_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    bound_factory(BoundKind::ExclusiveMinimum, value)
}

pub(crate) fn exclusive_maximum_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    bound_factory(BoundKind::ExclusiveMaximum, value)
}

pub(crate) fn multiple_of_factory(
    value: &Value,
    _schema: &Map<String, Value>,
) -> Option<Box<dyn KeywordValidator>> {
    let divisor = value.as_f64()?;
    if divisor == 0.0 {
        // Division by zero admits nothing meaningful; skip the keyword.
        return None;
    }
    Some(Box::new(MultipleOf { divisor }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use crate::schema::Schema;
    use serde_json::json;
    use trellis_document::Span;

    fn number(value: f64) -> DocumentNode {
        DocumentNode::number(value, Span::default())
    }

    #[test]
    fn minimum_boundary_is_inclusive() {
        let schema = Schema::handle(json!({"minimum": 5})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&number(5.0), &schema).valid);
        assert!(validator.validate(&number(10.0), &schema).valid);

        let report = validator.validate(&number(4.999_999_999), &schema);
        assert!(!report.valid);
        assert_eq!(report.errors[0].keyword, "minimum");
    }

    #[test]
    fn maximum_boundary_is_inclusive() {
        let schema = Schema::handle(json!({"maximum": 10})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&number(10.0), &schema).valid);
        assert!(!validator.validate(&number(10.000_001), &schema).valid);
    }

    #[test]
    fn exclusive_bounds_reject_the_boundary() {
        let validator = Validator::new();
        let min = Schema::handle(json!({"exclusiveMinimum": 0})).unwrap();
        assert!(validator.validate(&number(0.001), &min).valid);
        assert!(!validator.validate(&number(0.0), &min).valid);

        let max = Schema::handle(json!({"exclusiveMaximum": 1})).unwrap();
        assert!(validator.validate(&number(0.999), &max).valid);
        assert!(!validator.validate(&number(1.0), &max).valid);
    }

    #[test]
    fn multiple_of_absorbs_float_rounding() {
        let schema = Schema::handle(json!({"multipleOf": 0.1})).unwrap();
        let validator = Validator::new();
        // 0.3 / 0.1 is 2.9999999999999996 in f64.
        assert!(validator.validate(&number(0.3), &schema).valid);
        assert!(validator.validate(&number(1.0), &schema).valid);
        assert!(!validator.validate(&number(0.35), &schema).valid);
    }

    #[test]
    fn multiple_of_exact_integers() {
        let schema = Schema::handle(json!({"multipleOf": 3})).unwrap();
        let validator = Validator::new();
        assert!(validator.validate(&number(9.0), &schema).valid);
        assert!(!validator.validate(&number(10.0), &schema).valid);
    }

    #[test]
    fn zero_divisor_is_skipped() {
        let schema = Schema::handle(json!({"multipleOf": 0})).unwrap();
        assert!(Validator::new().validate(&number(7.0), &schema).valid);
    }

    #[test]
    fn bounds_are_inert_on_strings() {
        let schema = Schema::handle(json!({"minimum": 5})).unwrap();
        let node = DocumentNode::string("tiny", Span::default());
        assert!(Validator::new().validate(&node, &schema).valid);
    }

    #[test]
    fn error_params_carry_bound_and_actual() {
        let schema = Schema::handle(json!({"maximum": 10})).unwrap();
        let report = Validator::new().validate(&number(15.0), &schema);
        let error = &report.errors[0];
        assert_eq!(error.param("maximum"), Some(&json!(10.0)));
        assert_eq!(error.param("actual"), Some(&json!(15.0)));
        assert_eq!(error.schema_path, "/maximum");
    }
}
