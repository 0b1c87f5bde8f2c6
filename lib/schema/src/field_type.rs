//! Field types
//!
//! A field type binds a field's values to the comparator that scores them
//! and to the blocking and index predicate generators that find candidate
//! pairs for them. The variants form a closed set selected by the `type`
//! tag of a [`FieldDefinition`]; the predicate tables are static.

use crate::predicates::{BlockingPredicate, FieldPredicate, IndexPredicate, IndexedPredicate};
use crate::schema::SchemaError;
use dedupx_core::{Comparator, FieldValue, SharedComparator};
use dedupx_similarity::{
    CosineSetSimilarity, ExactDistance, NumberDistance, StringDistance, StringMetric,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const STRING_PREDICATES: &[BlockingPredicate] = &[
    BlockingPredicate::WholeField,
    BlockingPredicate::FirstToken,
    BlockingPredicate::FirstTwoTokens,
    BlockingPredicate::CommonInteger,
    BlockingPredicate::NearIntegers,
    BlockingPredicate::FirstInteger,
    BlockingPredicate::HundredInteger,
    BlockingPredicate::HundredIntegersOdd,
    BlockingPredicate::AlphaNumeric,
    BlockingPredicate::SameThreeCharStart,
    BlockingPredicate::SameFiveCharStart,
    BlockingPredicate::SameSevenCharStart,
    BlockingPredicate::CommonTwoTokens,
    BlockingPredicate::CommonThreeTokens,
    BlockingPredicate::Fingerprint,
    BlockingPredicate::OneGramFingerprint,
    BlockingPredicate::TwoGramFingerprint,
    BlockingPredicate::SortedAcronym,
];

const STRING_INDEX_PREDICATES: &[IndexPredicate] = &[
    IndexPredicate::TfidfNgramCanopy,
    IndexPredicate::TfidfNgramSearch,
];

const EXACT_PREDICATES: &[BlockingPredicate] = &[BlockingPredicate::WholeField];

const PRICE_PREDICATES: &[BlockingPredicate] = &[
    BlockingPredicate::OrderOfMagnitude,
    BlockingPredicate::WholeField,
    BlockingPredicate::RoundTo1,
];

const SET_PREDICATES: &[BlockingPredicate] = &[
    BlockingPredicate::WholeSet,
    BlockingPredicate::CommonSetElement,
    BlockingPredicate::LastSetElement,
    BlockingPredicate::CommonTwoElements,
    BlockingPredicate::CommonThreeElements,
    BlockingPredicate::MagnitudeOfCardinality,
    BlockingPredicate::FirstSetElement,
];

const SET_INDEX_PREDICATES: &[IndexPredicate] = &[
    IndexPredicate::TfidfSetSearch,
    IndexPredicate::TfidfSetCanopy,
];

const TFIDF_THRESHOLDS: &[f64] = &[0.2, 0.4, 0.6, 0.8];

/// Type tag selecting a field type variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, compared by string distance
    String,
    /// Identifiers and codes, compared by equality
    Exact,
    /// Positive amounts, compared by relative difference
    Price,
    /// Collections of discrete tokens, compared by weighted cosine
    Set,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Exact => "Exact",
            FieldKind::Price => "Price",
            FieldKind::Set => "Set",
        }
    }

    pub fn blocking_predicates(self) -> &'static [BlockingPredicate] {
        match self {
            FieldKind::String => STRING_PREDICATES,
            FieldKind::Exact => EXACT_PREDICATES,
            FieldKind::Price => PRICE_PREDICATES,
            FieldKind::Set => SET_PREDICATES,
        }
    }

    pub fn index_predicates(self) -> &'static [IndexPredicate] {
        match self {
            FieldKind::String => STRING_INDEX_PREDICATES,
            FieldKind::Set => SET_INDEX_PREDICATES,
            FieldKind::Exact | FieldKind::Price => &[],
        }
    }

    pub fn index_thresholds(self) -> &'static [f64] {
        match self {
            FieldKind::String | FieldKind::Set => TFIDF_THRESHOLDS,
            FieldKind::Exact | FieldKind::Price => &[],
        }
    }

    /// Value a canonical record carries when no record in the cluster had data
    pub fn empty_value(self) -> FieldValue {
        match self {
            FieldKind::String | FieldKind::Exact => FieldValue::Text(String::new()),
            FieldKind::Price => FieldValue::from(0u64),
            FieldKind::Set => FieldValue::Set(Vec::new()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative definition of one field, as found in a schema file
///
/// ```json
/// {"field": "cuisine", "type": "Set", "corpus": [["pizza", "italian"]]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub field: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Prior set observations weighting [`FieldKind::Set`] elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<Vec<Vec<String>>>,

    /// String metric for [`FieldKind::String`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<StringMetric>,
}

impl FieldDefinition {
    pub fn new(field: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field: field.into(),
            kind,
            corpus: None,
            metric: None,
        }
    }

    pub fn string(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::String)
    }

    pub fn exact(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Exact)
    }

    pub fn price(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Price)
    }

    pub fn set(field: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Set)
    }

    pub fn with_corpus(mut self, corpus: Vec<Vec<String>>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn with_metric(mut self, metric: StringMetric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// A constructed, immutable field type
///
/// Cheap to clone: the comparator is shared.
#[derive(Clone)]
pub struct FieldType {
    definition: FieldDefinition,
    comparator: SharedComparator,
}

impl FieldType {
    /// Build the field type described by `definition`.
    ///
    /// Options a variant does not recognize are rejected. A set field with
    /// no corpus gets an empty one, i.e. uniform element weights.
    pub fn new(mut definition: FieldDefinition) -> Result<Self, SchemaError> {
        let comparator: SharedComparator = match definition.kind {
            FieldKind::String => {
                reject_option(&definition, "corpus", definition.corpus.is_some())?;
                Arc::new(StringDistance::new(definition.metric.unwrap_or_default()))
            }
            FieldKind::Exact => {
                reject_option(&definition, "corpus", definition.corpus.is_some())?;
                reject_option(&definition, "metric", definition.metric.is_some())?;
                Arc::new(ExactDistance)
            }
            FieldKind::Price => {
                reject_option(&definition, "corpus", definition.corpus.is_some())?;
                reject_option(&definition, "metric", definition.metric.is_some())?;
                Arc::new(NumberDistance)
            }
            FieldKind::Set => {
                reject_option(&definition, "metric", definition.metric.is_some())?;
                let corpus = definition.corpus.get_or_insert_with(Vec::new);
                Arc::new(CosineSetSimilarity::new(corpus.iter()))
            }
        };

        Ok(Self {
            definition,
            comparator,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.definition.field
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.definition.kind
    }

    /// The definition this type was built from, with defaults filled in
    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    /// Primary comparator for values of this field
    #[inline]
    pub fn comparator(&self) -> &dyn Comparator {
        self.comparator.as_ref()
    }

    pub fn shared_comparator(&self) -> SharedComparator {
        Arc::clone(&self.comparator)
    }

    pub fn blocking_predicate_generators(&self) -> &'static [BlockingPredicate] {
        self.kind().blocking_predicates()
    }

    pub fn indexed_predicate_generators(&self) -> &'static [IndexPredicate] {
        self.kind().index_predicates()
    }

    pub fn indexed_predicate_thresholds(&self) -> &'static [f64] {
        self.kind().index_thresholds()
    }

    pub fn empty_value(&self) -> FieldValue {
        self.kind().empty_value()
    }

    /// Blocking generators bound to this field, in table order
    pub fn blocking_predicates(&self) -> Vec<FieldPredicate> {
        self.blocking_predicate_generators()
            .iter()
            .map(|&generator| FieldPredicate {
                field: self.name().to_string(),
                generator,
            })
            .collect()
    }

    /// Every (generator, threshold) pair for this field, generator-major
    pub fn indexed_predicates(&self) -> Vec<IndexedPredicate> {
        let thresholds = self.indexed_predicate_thresholds();
        self.indexed_predicate_generators()
            .iter()
            .flat_map(|&generator| {
                thresholds.iter().map(move |&threshold| IndexedPredicate {
                    field: self.name().to_string(),
                    generator,
                    threshold,
                })
            })
            .collect()
    }
}

fn reject_option(
    definition: &FieldDefinition,
    option: &'static str,
    present: bool,
) -> Result<(), SchemaError> {
    if present {
        return Err(SchemaError::UnsupportedOption {
            field: definition.field.clone(),
            kind: definition.kind,
            option,
        });
    }
    Ok(())
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldType")
            .field("field", &self.definition.field)
            .field("kind", &self.definition.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(elements: &[&str]) -> FieldValue {
        FieldValue::from(elements.to_vec())
    }

    #[test]
    fn test_set_type_tables() {
        let field = FieldType::new(FieldDefinition::set("tags")).unwrap();
        assert_eq!(field.kind(), FieldKind::Set);
        assert_eq!(
            field.blocking_predicate_generators(),
            &[
                BlockingPredicate::WholeSet,
                BlockingPredicate::CommonSetElement,
                BlockingPredicate::LastSetElement,
                BlockingPredicate::CommonTwoElements,
                BlockingPredicate::CommonThreeElements,
                BlockingPredicate::MagnitudeOfCardinality,
                BlockingPredicate::FirstSetElement,
            ]
        );
        assert_eq!(
            field.indexed_predicate_generators(),
            &[IndexPredicate::TfidfSetSearch, IndexPredicate::TfidfSetCanopy]
        );
        assert_eq!(field.indexed_predicate_thresholds(), &[0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn test_set_type_defaults_corpus() {
        let field = FieldType::new(FieldDefinition::set("tags")).unwrap();
        assert_eq!(field.definition().corpus, Some(Vec::new()));

        let a = set(&["a", "b"]);
        let b = set(&["b", "c"]);
        let d = field.comparator().distance(&a, &b).unwrap();
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_set_types_with_empty_corpus_agree() {
        let first = FieldType::new(FieldDefinition::set("tags")).unwrap();
        let second = FieldType::new(FieldDefinition::set("tags").with_corpus(Vec::new())).unwrap();

        let a = set(&["italian", "pizza", "pasta"]);
        let b = set(&["pizza", "delivery"]);
        assert_eq!(
            first.comparator().distance(&a, &b).unwrap(),
            second.comparator().distance(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_set_type_uses_corpus() {
        let corpus = vec![
            vec!["pizza".to_string(), "food".to_string()],
            vec!["sushi".to_string(), "food".to_string()],
        ];
        let weighted = FieldType::new(FieldDefinition::set("tags").with_corpus(corpus)).unwrap();
        let uniform = FieldType::new(FieldDefinition::set("tags")).unwrap();

        let a = set(&["pizza", "food"]);
        let b = set(&["sushi", "food"]);
        assert!(
            weighted.comparator().distance(&a, &b).unwrap()
                > uniform.comparator().distance(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_indexed_predicates_cross_product() {
        let field = FieldType::new(FieldDefinition::set("tags")).unwrap();
        let predicates = field.indexed_predicates();
        assert_eq!(predicates.len(), 2 * 4);

        assert_eq!(predicates[0].generator, IndexPredicate::TfidfSetSearch);
        assert_eq!(predicates[0].threshold, 0.2);
        assert_eq!(predicates[3].threshold, 0.8);
        assert_eq!(predicates[4].generator, IndexPredicate::TfidfSetCanopy);
        assert_eq!(predicates[4].threshold, 0.2);
        assert!(predicates.iter().all(|p| p.field == "tags"));
    }

    #[test]
    fn test_thresholds_in_unit_interval() {
        for kind in [FieldKind::String, FieldKind::Exact, FieldKind::Price, FieldKind::Set] {
            assert!(kind.index_thresholds().iter().all(|&t| t > 0.0 && t <= 1.0));
            if kind.index_predicates().is_empty() {
                assert!(kind.index_thresholds().is_empty());
            }
        }
    }

    #[test]
    fn test_blocking_predicates_bound_to_field() {
        let field = FieldType::new(FieldDefinition::price("price")).unwrap();
        let predicates = field.blocking_predicates();
        assert_eq!(predicates.len(), 3);
        assert_eq!(predicates[0].generator, BlockingPredicate::OrderOfMagnitude);
        assert!(field.indexed_predicates().is_empty());
    }

    #[test]
    fn test_unsupported_options() {
        let err = FieldType::new(
            FieldDefinition::string("name").with_corpus(vec![vec!["x".to_string()]]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedOption { option: "corpus", kind: FieldKind::String, .. }
        ));

        let err = FieldType::new(FieldDefinition::set("tags").with_metric(StringMetric::Trigram))
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedOption { option: "metric", .. }));
    }

    #[test]
    fn test_string_metric_option() {
        let field =
            FieldType::new(FieldDefinition::string("name").with_metric(StringMetric::Jaccard))
                .unwrap();
        let d = field
            .comparator()
            .distance(&"Acme Corp".into(), &"acme corp".into())
            .unwrap();
        assert_eq!(d, 0.0);

        let shared = field.shared_comparator();
        assert_eq!(shared.distance(&"Acme Corp".into(), &"acme corp".into()).unwrap(), d);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(FieldKind::String.empty_value(), FieldValue::from(""));
        assert_eq!(FieldKind::Set.empty_value(), FieldValue::Set(vec![]));
        assert_eq!(FieldKind::Price.empty_value(), FieldValue::from(0u64));
        for kind in [FieldKind::String, FieldKind::Exact, FieldKind::Price, FieldKind::Set] {
            assert!(kind.empty_value().is_empty());
        }
    }

    #[test]
    fn test_definition_serde() {
        let definition: FieldDefinition =
            serde_json::from_str(r#"{"field": "tags", "type": "Set", "corpus": [["a", "b"]]}"#)
                .unwrap();
        assert_eq!(definition.kind, FieldKind::Set);
        assert_eq!(definition.corpus, Some(vec![vec!["a".to_string(), "b".to_string()]]));

        let json = serde_json::to_string(&FieldDefinition::string("name")).unwrap();
        assert_eq!(json, r#"{"field":"name","type":"String"}"#);
    }
}
