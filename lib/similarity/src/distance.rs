//! Distance functions for scalar field values
//!
//! Similarity helpers return a score in [0.0, 1.0] where 1.0 means
//! identical; the comparator types turn them into distances
//! (`1.0 - similarity`) so identical input is always exactly 0.0.

use dedupx_core::{number_operand, text_operand, Comparator, Distance, FieldValue, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// String similarity metric used by [`StringDistance`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StringMetric {
    /// Normalized Levenshtein edit distance
    #[default]
    Levenshtein,
    /// Character trigram overlap, case-insensitive
    Trigram,
    /// Jaccard overlap of whitespace tokens, case-insensitive
    Jaccard,
}

/// Calculate text similarity between two strings
pub fn text_similarity(a: &str, b: &str, metric: StringMetric) -> f64 {
    match metric {
        StringMetric::Levenshtein => strsim::normalized_levenshtein(a, b),
        StringMetric::Trigram => trigram_similarity(a, b),
        StringMetric::Jaccard => jaccard_tokens(a, b),
    }
}

/// Relative numeric similarity: 1 - |a - b| / max(|a|, |b|)
pub fn number_similarity(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        1.0 // Both are zero
    } else {
        (1.0 - (a - b).abs() / max).max(0.0)
    }
}

/// Jaccard similarity between token sets
fn jaccard_tokens(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = a.split_whitespace()
        .map(|s| s.to_lowercase())
        .collect();
    let tokens_b: HashSet<String> = b.split_whitespace()
        .map(|s| s.to_lowercase())
        .collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    if union == 0 { 0.0 } else { intersection as f64 / union as f64 }
}

/// Trigram similarity between two strings
fn trigram_similarity(a: &str, b: &str) -> f64 {
    let trigrams_a = generate_trigrams(&a.to_lowercase());
    let trigrams_b = generate_trigrams(&b.to_lowercase());

    if trigrams_a.is_empty() && trigrams_b.is_empty() {
        return 1.0;
    }

    if trigrams_a.is_empty() || trigrams_b.is_empty() {
        return 0.0;
    }

    let intersection = trigrams_a.intersection(&trigrams_b).count();
    let union = trigrams_a.union(&trigrams_b).count();

    if union == 0 { 0.0 } else { intersection as f64 / union as f64 }
}

/// Generate character trigrams from a string
fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return HashSet::new();
    }

    chars.windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}

/// Default comparator for text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringDistance {
    metric: StringMetric,
}

impl StringDistance {
    pub fn new(metric: StringMetric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> StringMetric {
        self.metric
    }
}

impl Comparator for StringDistance {
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance> {
        let a = text_operand("string", a)?;
        let b = text_operand("string", b)?;
        if a == b {
            return Ok(0.0);
        }
        Ok((1.0 - text_similarity(a, b, self.metric)).max(0.0))
    }
}

/// Comparator for numeric fields such as prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberDistance;

impl Comparator for NumberDistance {
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance> {
        let a = number_operand("number", a)?;
        let b = number_operand("number", b)?;
        Ok(1.0 - number_similarity(a, b))
    }
}

/// 0.0 for equal values, 1.0 otherwise; accepts any value kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactDistance;

impl Comparator for ExactDistance {
    #[inline]
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance> {
        Ok(if a == b { 0.0 } else { 1.0 })
    }
}
