//! # DedupX Core
//!
//! Core types for the DedupX record-merging engine.
//!
//! This crate provides the building blocks every other DedupX crate works on:
//!
//! - [`FieldValue`] - One observed value of one field
//! - [`Record`] - A mapping from field name to value
//! - [`Comparator`] - Pairwise distance between two values
//! - [`DistanceMatrix`] - Symmetric pairwise distances over a variant list
//! - [`select_centroid`] - The most central value of a variant list
//!
//! ## Example
//!
//! ```rust
//! use dedupx_core::{select_centroid_with, FieldValue, PreferLongest, Result};
//!
//! let same = |a: &FieldValue, b: &FieldValue| -> Result<f64> {
//!     Ok(if a == b { 0.0 } else { 1.0 })
//! };
//! let variants = vec![FieldValue::from("IBM"), FieldValue::from("IBM Corp")];
//!
//! // Two variants always tie; the policy decides
//! let centroid = select_centroid_with(&variants, &same, &PreferLongest).unwrap();
//! assert_eq!(centroid, &FieldValue::from("IBM Corp"));
//! ```

pub mod centroid;
pub mod comparator;
pub mod error;
pub mod record;
pub mod value;

pub use centroid::{
    centroid_index, select_centroid, select_centroid_with, DistanceMatrix, FirstInOrder,
    PreferLongest, TieBreak,
};
pub use comparator::{
    number_operand, set_operand, text_operand, Comparator, Distance, SharedComparator,
};
pub use error::{Error, Result};
pub use record::{CanonicalRecord, Record};
pub use value::{FieldValue, ValueKind};
