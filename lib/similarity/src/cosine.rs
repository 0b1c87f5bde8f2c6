//! Corpus-weighted cosine similarity over token sets
//!
//! Each set is treated as a binary term vector whose entries are weighted by
//! smoothed inverse document frequency learned from a background corpus of
//! prior set observations. Rare elements count for more than common ones.
//! With an empty corpus every element weighs 1.0, which reduces to plain
//! set cosine: `|A ∩ B| / sqrt(|A| * |B|)`.

use ahash::AHashMap;
use dedupx_core::{set_operand, Comparator, Distance, FieldValue, Result};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct CosineSetSimilarity {
    /// element -> number of corpus documents containing it
    document_frequency: AHashMap<String, u32>,
    documents: u32,
}

impl CosineSetSimilarity {
    /// Learn element weights from `corpus`; each document counts an
    /// element at most once
    pub fn new<C, D, T>(corpus: C) -> Self
    where
        C: IntoIterator<Item = D>,
        D: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut document_frequency: AHashMap<String, u32> = AHashMap::new();
        let mut documents = 0u32;

        for document in corpus {
            let unique: BTreeSet<String> = document
                .into_iter()
                .map(|element| element.as_ref().to_string())
                .collect();
            for element in unique {
                *document_frequency.entry(element).or_insert(0) += 1;
            }
            documents += 1;
        }

        Self {
            document_frequency,
            documents,
        }
    }

    /// Similarity with uniform element weights
    pub fn uniform() -> Self {
        Self::default()
    }

    #[inline]
    pub fn corpus_size(&self) -> u32 {
        self.documents
    }

    /// Smoothed idf: ln((1 + N) / (1 + df)) + 1
    pub fn weight(&self, element: &str) -> f64 {
        if self.documents == 0 {
            return 1.0;
        }
        let df = self.document_frequency.get(element).copied().unwrap_or(0);
        ((1.0 + self.documents as f64) / (1.0 + df as f64)).ln() + 1.0
    }

    /// Cosine similarity in [0.0, 1.0] between two element sets
    pub fn similarity<A, B>(&self, a: &[A], b: &[B]) -> f64
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        // Sorted sets keep float summation order stable across calls
        let set_a: BTreeSet<&str> = a.iter().map(|e| e.as_ref()).collect();
        let set_b: BTreeSet<&str> = b.iter().map(|e| e.as_ref()).collect();

        if set_a.is_empty() && set_b.is_empty() {
            return 1.0;
        }
        if set_a.is_empty() || set_b.is_empty() {
            return 0.0;
        }
        if set_a == set_b {
            return 1.0;
        }

        let squared_norm = |set: &BTreeSet<&str>| -> f64 {
            set.iter().map(|e| self.weight(e).powi(2)).sum()
        };
        let dot: f64 = set_a
            .intersection(&set_b)
            .map(|e| self.weight(e).powi(2))
            .sum();
        if dot == 0.0 {
            return 0.0;
        }

        let norm = (squared_norm(&set_a) * squared_norm(&set_b)).sqrt();
        (dot / norm).clamp(0.0, 1.0)
    }
}

impl Comparator for CosineSetSimilarity {
    fn distance(&self, a: &FieldValue, b: &FieldValue) -> Result<Distance> {
        let a = set_operand("cosine set", a)?;
        let b = set_operand("cosine set", b)?;
        Ok((1.0 - self.similarity(a, b)).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(elements: &[&str]) -> FieldValue {
        FieldValue::from(elements.to_vec())
    }

    #[test]
    fn test_uniform_weights() {
        let cosine = CosineSetSimilarity::uniform();
        assert_eq!(cosine.weight("anything"), 1.0);
        assert!((cosine.similarity(&["a", "b"], &["b", "c"]) - 0.5).abs() < 1e-12);
        assert_eq!(cosine.similarity(&["a"], &["b"]), 0.0);
    }

    #[test]
    fn test_empty_corpus_constructions_agree() {
        let empty: Vec<Vec<String>> = Vec::new();
        let first = CosineSetSimilarity::new(empty.clone());
        let second = CosineSetSimilarity::new(empty);

        let a = set(&["red", "green", "blue"]);
        let b = set(&["green", "blue", "yellow"]);
        assert_eq!(first.distance(&a, &b).unwrap(), second.distance(&a, &b).unwrap());
        assert_eq!(
            first.distance(&a, &b).unwrap(),
            CosineSetSimilarity::uniform().distance(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_corpus_downweights_common_elements() {
        let corpus = vec![
            vec!["a", "common"],
            vec!["b", "common"],
            vec!["c", "common"],
        ];
        let weighted = CosineSetSimilarity::new(corpus);
        assert_eq!(weighted.corpus_size(), 3);
        assert!(weighted.weight("a") > weighted.weight("common"));
        assert!(weighted.weight("never-seen") > weighted.weight("a"));

        let shared_common = weighted.similarity(&["a", "common"], &["b", "common"]);
        let uniform = CosineSetSimilarity::uniform().similarity(&["a", "common"], &["b", "common"]);
        assert!(shared_common < uniform);
    }

    #[test]
    fn test_duplicate_elements_within_document() {
        let cosine = CosineSetSimilarity::new(vec![vec!["x", "x", "y"]]);
        assert_eq!(cosine.weight("x"), cosine.weight("y"));
    }

    #[test]
    fn test_distance_identity_and_symmetry() {
        let cosine = CosineSetSimilarity::new(vec![vec!["a", "b"], vec!["b"]]);
        let a = set(&["a", "b", "c"]);
        let b = set(&["c", "b", "a"]);
        let c = set(&["a", "d"]);

        assert_eq!(cosine.distance(&a, &b).unwrap(), 0.0);
        assert_eq!(cosine.distance(&a, &c).unwrap(), cosine.distance(&c, &a).unwrap());
        assert!(cosine.distance(&a, &c).unwrap() > 0.0);
    }

    #[test]
    fn test_rejects_text_values() {
        let cosine = CosineSetSimilarity::uniform();
        assert!(cosine.distance(&FieldValue::from("a b"), &set(&["a"])).is_err());
    }
}
