//! Pairwise comparator contract
//!
//! A comparator maps two values of the same field to a [`Distance`]:
//! non-negative, symmetric, and zero for identical input. No triangle
//! inequality is assumed.
//!
//! Closures of the right shape are comparators, so ad-hoc distances need no
//! wrapper type:
//!
//! ```rust
//! use dedupx_core::{Comparator, FieldValue, Result};
//!
//! let same_length = |a: &FieldValue, b: &FieldValue| -> Result<f64> {
//!     let (a, b) = (a.to_string(), b.to_string());
//!     Ok((a.len() as f64 - b.len() as f64).abs())
//! };
//! let d = same_length
//!     .distance(&FieldValue::from("Jon"), &FieldValue::from("John"))
//!     .unwrap();
//! assert_eq!(d, 1.0);
//! ```

use crate::error::{Error, Result};
use crate::value::{FieldValue, ValueKind};
use std::sync::Arc;

/// Distance between two values; 0.0 means identical
pub type Distance = f64;

/// Pairwise distance between two field values.
///
/// Implementations must be safe to call concurrently: field types holding
/// a comparator are shared read-only between threads.
pub trait Comparator: Send + Sync {
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance>;
}

impl<F> Comparator for F
where
    F: Fn(&FieldValue, &FieldValue) -> Result<Distance> + Send + Sync,
{
    #[inline]
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance> {
        self(a, b)
    }
}

/// Shared handle to a comparator, as stored on field types
pub type SharedComparator = Arc<dyn Comparator>;

/// Borrow `value` as text or report which comparator rejected it
pub fn text_operand<'a>(comparator: &'static str, value: &'a FieldValue) -> Result<&'a str> {
    value.as_text().ok_or(Error::KindMismatch {
        comparator,
        expected: ValueKind::Text,
        actual: value.kind(),
    })
}

/// Read `value` as a number or report which comparator rejected it
pub fn number_operand(comparator: &'static str, value: &FieldValue) -> Result<f64> {
    value.as_number().ok_or(Error::KindMismatch {
        comparator,
        expected: ValueKind::Number,
        actual: value.kind(),
    })
}

/// Borrow `value` as a set or report which comparator rejected it
pub fn set_operand<'a>(comparator: &'static str, value: &'a FieldValue) -> Result<&'a [String]> {
    value.as_set().ok_or(Error::KindMismatch {
        comparator,
        expected: ValueKind::Set,
        actual: value.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_comparator() {
        let exact = |a: &FieldValue, b: &FieldValue| -> Result<Distance> {
            Ok(if a == b { 0.0 } else { 1.0 })
        };
        let shared: SharedComparator = Arc::new(exact);

        let a = FieldValue::from("x");
        let b = FieldValue::from("y");
        assert_eq!(shared.distance(&a, &a).unwrap(), 0.0);
        assert_eq!(shared.distance(&a, &b).unwrap(), 1.0);
    }

    #[test]
    fn test_operand_kind_mismatch() {
        let err = text_operand("test", &FieldValue::from(1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::KindMismatch {
                comparator: "test",
                expected: ValueKind::Text,
                actual: ValueKind::Number,
            }
        );
        assert_eq!(number_operand("test", &FieldValue::from(2.0)).unwrap(), 2.0);
        assert!(set_operand("test", &FieldValue::from("a")).is_err());
    }
}
