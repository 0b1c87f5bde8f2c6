//! Centroid selection over the variants of one field
//!
//! The centroid of a variant list is the value with the smallest average
//! distance to every variant in the list (itself included). Distances are
//! computed once per unordered pair into a symmetric [`DistanceMatrix`];
//! ties on the minimum average are resolved by a [`TieBreak`] policy,
//! [`FirstInOrder`] unless the caller supplies another.
//!
//! ```rust
//! use dedupx_core::{select_centroid, FieldValue, Result};
//!
//! let edits = |a: &FieldValue, b: &FieldValue| -> Result<f64> {
//!     Ok(if a == b { 0.0 } else { 1.0 })
//! };
//! let variants = vec![
//!     FieldValue::from("Jon"),
//!     FieldValue::from("John"),
//!     FieldValue::from("Jon"),
//! ];
//! assert_eq!(select_centroid(&variants, &edits).unwrap(), &FieldValue::from("Jon"));
//! ```

use crate::comparator::{Comparator, Distance};
use crate::error::{Error, Result};
use crate::value::FieldValue;
use std::borrow::Borrow;

/// Square, symmetric, zero-diagonal matrix of pairwise distances
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<Distance>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances between `variants`.
    ///
    /// The comparator is called exactly once per unordered pair `j < i`;
    /// the diagonal is never computed. NaN or negative distances are
    /// rejected, and the first comparator error aborts the build.
    pub fn build<V, C>(variants: &[V], comparator: &C) -> Result<Self>
    where
        V: Borrow<FieldValue>,
        C: Comparator + ?Sized,
    {
        let size = variants.len();
        let mut distances = vec![0.0; size * size];

        for i in 0..size {
            for j in 0..i {
                let distance = comparator.distance(variants[i].borrow(), variants[j].borrow())?;
                if distance.is_nan() || distance < 0.0 {
                    return Err(Error::InvalidDistance {
                        distance,
                        left: j,
                        right: i,
                    });
                }
                distances[i * size + j] = distance;
                distances[j * size + i] = distance;
            }
        }

        Ok(Self { size, distances })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Distance {
        self.distances[row * self.size + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[Distance] {
        &self.distances[row * self.size..(row + 1) * self.size]
    }

    /// Mean of each row over all `size` entries, diagonal included
    pub fn average_distances(&self) -> Vec<Distance> {
        let n = self.size as Distance;
        (0..self.size)
            .map(|row| self.row(row).iter().sum::<Distance>() / n)
            .collect()
    }
}

/// Policy choosing one value among variants tied on minimum average distance
pub trait TieBreak: Send + Sync {
    /// `tied` holds at least two values, in input order. Returns a position
    /// into `tied`.
    fn choose(&self, tied: &[&FieldValue]) -> usize;
}

/// Pick the first tied variant in input order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstInOrder;

impl TieBreak for FirstInOrder {
    #[inline]
    fn choose(&self, _tied: &[&FieldValue]) -> usize {
        0
    }
}

/// Pick the tied variant with the longest textual rendering; the first
/// one wins among equally long candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferLongest;

impl TieBreak for PreferLongest {
    fn choose(&self, tied: &[&FieldValue]) -> usize {
        let mut best = 0;
        let mut best_len = 0;
        for (pos, value) in tied.iter().enumerate() {
            let len = value.to_string().chars().count();
            if pos == 0 || len > best_len {
                best = pos;
                best_len = len;
            }
        }
        best
    }
}

/// Index of the centroid of `variants`
pub fn centroid_index<V, C>(
    variants: &[V],
    comparator: &C,
    tie_break: &dyn TieBreak,
) -> Result<usize>
where
    V: Borrow<FieldValue>,
    C: Comparator + ?Sized,
{
    match variants.len() {
        0 => return Err(Error::EmptyVariants),
        1 => return Ok(0),
        _ => {}
    }

    let matrix = DistanceMatrix::build(variants, comparator)?;
    let averages = matrix.average_distances();

    let min = averages.iter().copied().fold(Distance::INFINITY, Distance::min);
    let tied: Vec<usize> = averages
        .iter()
        .enumerate()
        .filter(|(_, avg)| **avg == min)
        .map(|(i, _)| i)
        .collect();

    if tied.len() == 1 {
        return Ok(tied[0]);
    }

    let candidates: Vec<&FieldValue> = tied.iter().map(|&i| variants[i].borrow()).collect();
    let pos = tie_break.choose(&candidates);
    tracing::trace!(tied = tied.len(), chosen = pos, "broke centroid tie");
    Ok(tied.get(pos).copied().unwrap_or(tied[0]))
}

/// Centroid of `variants`, ties resolved by [`FirstInOrder`]
pub fn select_centroid<'v, V, C>(variants: &'v [V], comparator: &C) -> Result<&'v FieldValue>
where
    V: Borrow<FieldValue>,
    C: Comparator + ?Sized,
{
    select_centroid_with(variants, comparator, &FirstInOrder)
}

/// Centroid of `variants`, ties resolved by `tie_break`
pub fn select_centroid_with<'v, V, C>(
    variants: &'v [V],
    comparator: &C,
    tie_break: &dyn TieBreak,
) -> Result<&'v FieldValue>
where
    V: Borrow<FieldValue>,
    C: Comparator + ?Sized,
{
    let index = centroid_index(variants, comparator, tie_break)?;
    Ok(variants[index].borrow())
}
