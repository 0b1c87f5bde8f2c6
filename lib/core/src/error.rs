use crate::value::ValueKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Cannot select a centroid from an empty variant list")]
    EmptyVariants,

    #[error("Comparator returned invalid distance {distance} for variants {left} and {right}")]
    InvalidDistance {
        distance: f64,
        left: usize,
        right: usize,
    },

    #[error("{comparator} comparator expects {expected} values, got {actual}")]
    KindMismatch {
        comparator: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Comparator error: {0}")]
    Comparator(String),
}
