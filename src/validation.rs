//! Validator predicates attachable to schemas.
//!
//! A validator is anything implementing [`Validator`](trait.Validator.html):
//! it inspects an element, optionally appends human-readable messages to the
//! element's `errors`, and reports a boolean verdict. Plain closures
//! `Fn(&mut Element, &Context) -> bool` are validators too, with no sentinel
//! gating.
//!
//! The structs in this module are the stock predicates; attach them with
//! [`Schema::validated_by`](../struct.Schema.html#method.validated_by):
//!
//! ```
//! use sieve::Schema;
//! use sieve::validation::{shared, Present, LongerThan};
//!
//! let name = Schema::text().validated_by(vec![shared(Present), shared(LongerThan(2))]);
//! let mut element = name.from_raw("ab");
//! assert!(!element.validate());
//! assert_eq!(element.errors(), ["Must be longer than 2."]);
//! ```

use std::sync::Arc;

use crate::element::{Context, Element};
use crate::value::Value;

/// A predicate attached to a schema.
///
/// [`run`](#method.run) is the entry point used during validation: it first
/// gates on the two sentinels — a validator that does not opt in via
/// [`accepts_unspecified`](#method.accepts_unspecified) /
/// [`accepts_not_unserializable`](#method.accepts_not_unserializable) fails
/// silently on them — and then delegates to
/// [`validate`](#tymethod.validate), the override point for the actual
/// check.
pub trait Validator {
    /// Whether this validator wants to see `Unspecified` values.
    fn accepts_unspecified(&self) -> bool {
        false
    }

    /// Whether this validator wants to see `NotUnserializable` values.
    fn accepts_not_unserializable(&self) -> bool {
        false
    }

    /// The actual check; may append messages to `element.errors`.
    fn validate(&self, element: &mut Element, context: &Context) -> bool;

    /// Gate on sentinels, then run [`validate`](#tymethod.validate).
    fn run(&self, element: &mut Element, context: &Context) -> bool {
        let value = element.value();
        if value.is_unspecified() && !self.accepts_unspecified() {
            return false;
        }
        if value.is_not_unserializable() && !self.accepts_not_unserializable() {
            return false;
        }
        self.validate(element, context)
    }
}

/// A validator as stored on a schema.
pub type SharedValidator = Arc<dyn Validator + Send + Sync>;

/// Wrap a validator for attachment to a schema.
pub fn shared<V>(validator: V) -> SharedValidator
where
    V: Validator + Send + Sync + 'static,
{
    Arc::new(validator)
}

/// Bare predicates are validators without sentinel gating.
impl<F> Validator for F
where
    F: Fn(&mut Element, &Context) -> bool + Send + Sync,
{
    fn validate(&self, element: &mut Element, context: &Context) -> bool {
        self(element, context)
    }

    fn run(&self, element: &mut Element, context: &Context) -> bool {
        self(element, context)
    }
}

/// Fails with `"May not be blank."` if the value is unspecified.
pub struct Present;

impl Validator for Present {
    fn accepts_unspecified(&self) -> bool {
        true
    }

    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if element.value().is_unspecified() {
            element.add_error("May not be blank.");
            return false;
        }
        true
    }
}

/// Fails with `"Not a valid value."` if the value is not unserializable.
pub struct Converted;

impl Validator for Converted {
    fn accepts_not_unserializable(&self) -> bool {
        true
    }

    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if element.value().is_not_unserializable() {
            element.add_error("Not a valid value.");
            return false;
        }
        true
    }
}

/// Fails with `"Must be true."` if the value is falsy.
pub struct IsTrue;

impl Validator for IsTrue {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if !element.value().is_truthy() {
            element.add_error("Must be true.");
            return false;
        }
        true
    }
}

/// Fails with `"Must be false."` if the value is truthy.
pub struct IsFalse;

impl Validator for IsFalse {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if element.value().is_truthy() {
            element.add_error("Must be false.");
            return false;
        }
        true
    }
}

/// Fails with `"Must be shorter than {upperbound}."` if the length of the
/// value equals or exceeds the given upper bound.
pub struct ShorterThan(pub usize);

impl Validator for ShorterThan {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        match element.value().length() {
            Some(length) if length < self.0 => true,
            _ => {
                element.add_error(format!("Must be shorter than {}.", self.0));
                false
            }
        }
    }
}

/// Fails with `"Must be longer than {lowerbound}."` if the length of the
/// value equals or falls below the given lower bound.
pub struct LongerThan(pub usize);

impl Validator for LongerThan {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        match element.value().length() {
            Some(length) if length > self.0 => true,
            _ => {
                element.add_error(format!("Must be longer than {}.", self.0));
                false
            }
        }
    }
}

/// Fails with `"Must be longer than {start} and shorter than {end}."` unless
/// `start < length < end`.
pub struct LengthWithinRange(pub usize, pub usize);

impl Validator for LengthWithinRange {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        match element.value().length() {
            Some(length) if self.0 < length && length < self.1 => true,
            _ => {
                element.add_error(format!(
                    "Must be longer than {} and shorter than {}.",
                    self.0, self.1
                ));
                false
            }
        }
    }
}

/// Fails with `"Not a valid value."` if the value is not one of the given
/// options.
pub struct ContainedIn(pub Vec<Value>);

impl Validator for ContainedIn {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if !self.0.contains(&element.value()) {
            element.add_error("Not a valid value.");
            return false;
        }
        true
    }
}

/// Fails with `"Must be less than {upperbound}."` if the value equals or
/// exceeds the given upper bound.
pub struct LessThan(pub Value);

impl Validator for LessThan {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if element.value().total_cmp(&self.0) != std::cmp::Ordering::Less {
            element.add_error(format!("Must be less than {}.", self.0));
            return false;
        }
        true
    }
}

/// Fails with `"Must be greater than {lowerbound}."` if the value equals or
/// falls below the given lower bound.
pub struct GreaterThan(pub Value);

impl Validator for GreaterThan {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        if element.value().total_cmp(&self.0) != std::cmp::Ordering::Greater {
            element.add_error(format!("Must be greater than {}.", self.0));
            return false;
        }
        true
    }
}

/// Fails with `"Must be greater than {start} and shorter than {end}."`
/// unless `start < value < end`.
pub struct WithinRange(pub Value, pub Value);

impl Validator for WithinRange {
    fn validate(&self, element: &mut Element, _context: &Context) -> bool {
        use std::cmp::Ordering;
        let value = element.value();
        if value.total_cmp(&self.0) == Ordering::Greater
            && value.total_cmp(&self.1) == Ordering::Less
        {
            return true;
        }
        element.add_error(format!(
            "Must be greater than {} and shorter than {}.",
            self.0, self.1
        ));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn present() {
        let schema = Schema::text().validated_by(vec![shared(Present)]);
        let mut element = schema.create();
        assert!(!element.validate());
        assert_eq!(element.errors(), ["May not be blank."]);

        let mut element = schema.from_raw("hi");
        assert!(element.validate());
        assert!(element.errors().is_empty());
    }

    #[test]
    fn converted() {
        let schema = Schema::integer().validated_by(vec![shared(Converted)]);
        let mut element = schema.from_raw("abc");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Not a valid value."]);

        let mut element = schema.from_raw("1");
        assert!(element.validate());
    }

    #[test]
    fn sentinels_fail_silently_without_opt_in() {
        let schema = Schema::integer().validated_by(vec![shared(IsTrue)]);
        let mut element = schema.create();
        assert!(!element.validate());
        assert!(element.errors().is_empty());
    }

    #[test]
    fn is_true_and_is_false() {
        let schema = Schema::boolean().validated_by(vec![shared(IsTrue)]);
        let mut element = schema.from_raw("False");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be true."]);

        let schema = Schema::boolean().validated_by(vec![shared(IsFalse)]);
        let mut element = schema.from_raw("True");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be false."]);
    }

    #[test]
    fn length_bounds() {
        let schema = Schema::text().validated_by(vec![shared(ShorterThan(3))]);
        assert!(schema.from_raw("ab").validate());
        let mut element = schema.from_raw("abc");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be shorter than 3."]);

        let schema = Schema::text().validated_by(vec![shared(LongerThan(3))]);
        assert!(schema.from_raw("abcd").validate());
        let mut element = schema.from_raw("abc");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be longer than 3."]);

        let schema = Schema::text().validated_by(vec![shared(LengthWithinRange(1, 4))]);
        assert!(schema.from_raw("ab").validate());
        let mut element = schema.from_raw("a");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be longer than 1 and shorter than 4."]);
    }

    #[test]
    fn contained_in() {
        let schema = Schema::text()
            .validated_by(vec![shared(ContainedIn(vec!["red".into(), "green".into()]))]);
        assert!(schema.from_raw("red").validate());
        let mut element = schema.from_raw("blue");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Not a valid value."]);
    }

    #[test]
    fn ordering_bounds() {
        let schema = Schema::integer().validated_by(vec![shared(LessThan(Value::Int(10)))]);
        assert!(schema.from_raw("9").validate());
        let mut element = schema.from_raw("10");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be less than 10."]);

        let schema = Schema::integer().validated_by(vec![shared(GreaterThan(Value::Int(0)))]);
        assert!(schema.from_raw("1").validate());
        let mut element = schema.from_raw("0");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be greater than 0."]);

        let schema = Schema::integer()
            .validated_by(vec![shared(WithinRange(Value::Int(0), Value::Int(10)))]);
        assert!(schema.from_raw("5").validate());
        let mut element = schema.from_raw("0");
        assert!(!element.validate());
        assert_eq!(element.errors(), ["Must be greater than 0 and shorter than 10."]);
    }

    #[test]
    fn closures_are_not_gated() {
        let schema = Schema::integer().validated_by(vec![shared(
            |element: &mut Element, _: &Context| {
                let ok = !element.value().is_unspecified();
                if !ok {
                    element.add_error("missing");
                }
                ok
            },
        )]);
        let mut element = schema.create();
        assert!(!element.validate());
        assert_eq!(element.errors(), ["missing"]);
    }
}
