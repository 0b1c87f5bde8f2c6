//! # DedupX Similarity
//!
//! Ready-made comparators for DedupX field types.
//!
//! The merge core treats comparators as opaque; this crate supplies the
//! implementations the built-in field types bind to:
//!
//! - [`StringDistance`] - Normalized edit distance (default), trigram or token Jaccard
//! - [`NumberDistance`] - Relative numeric difference
//! - [`ExactDistance`] - Equality
//! - [`CosineSetSimilarity`] - Corpus-weighted cosine over token sets
//!
//! ## Example
//!
//! ```rust
//! use dedupx_core::{Comparator, FieldValue};
//! use dedupx_similarity::CosineSetSimilarity;
//!
//! let corpus = vec![vec!["pizza", "italian"], vec!["sushi", "japanese"]];
//! let cosine = CosineSetSimilarity::new(corpus);
//!
//! let a = FieldValue::from(vec!["pizza", "italian"]);
//! let b = FieldValue::from(vec!["italian", "pizza"]);
//! assert_eq!(cosine.distance(&a, &b).unwrap(), 0.0);
//! ```

pub mod cosine;
pub mod distance;

pub use cosine::CosineSetSimilarity;
pub use distance::{
    number_similarity, text_similarity, ExactDistance, NumberDistance, StringDistance,
    StringMetric,
};
