//! Predicate generator identities
//!
//! Blocking and indexing subsystems own the predicate logic; field types
//! only name which generators apply to them. The identities here are
//! stable and serialize to their snake_case names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cheap, coarse blocking predicate generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingPredicate {
    // String fields
    WholeField,
    FirstToken,
    FirstTwoTokens,
    CommonInteger,
    NearIntegers,
    FirstInteger,
    HundredInteger,
    HundredIntegersOdd,
    AlphaNumeric,
    SameThreeCharStart,
    SameFiveCharStart,
    SameSevenCharStart,
    CommonTwoTokens,
    CommonThreeTokens,
    Fingerprint,
    OneGramFingerprint,
    TwoGramFingerprint,
    SortedAcronym,

    // Set fields
    WholeSet,
    CommonSetElement,
    LastSetElement,
    CommonTwoElements,
    CommonThreeElements,
    MagnitudeOfCardinality,
    FirstSetElement,

    // Numeric fields
    OrderOfMagnitude,
    #[serde(rename = "round_to_1")]
    RoundTo1,
}

impl BlockingPredicate {
    pub fn name(self) -> &'static str {
        match self {
            BlockingPredicate::WholeField => "whole_field",
            BlockingPredicate::FirstToken => "first_token",
            BlockingPredicate::FirstTwoTokens => "first_two_tokens",
            BlockingPredicate::CommonInteger => "common_integer",
            BlockingPredicate::NearIntegers => "near_integers",
            BlockingPredicate::FirstInteger => "first_integer",
            BlockingPredicate::HundredInteger => "hundred_integer",
            BlockingPredicate::HundredIntegersOdd => "hundred_integers_odd",
            BlockingPredicate::AlphaNumeric => "alpha_numeric",
            BlockingPredicate::SameThreeCharStart => "same_three_char_start",
            BlockingPredicate::SameFiveCharStart => "same_five_char_start",
            BlockingPredicate::SameSevenCharStart => "same_seven_char_start",
            BlockingPredicate::CommonTwoTokens => "common_two_tokens",
            BlockingPredicate::CommonThreeTokens => "common_three_tokens",
            BlockingPredicate::Fingerprint => "fingerprint",
            BlockingPredicate::OneGramFingerprint => "one_gram_fingerprint",
            BlockingPredicate::TwoGramFingerprint => "two_gram_fingerprint",
            BlockingPredicate::SortedAcronym => "sorted_acronym",
            BlockingPredicate::WholeSet => "whole_set",
            BlockingPredicate::CommonSetElement => "common_set_element",
            BlockingPredicate::LastSetElement => "last_set_element",
            BlockingPredicate::CommonTwoElements => "common_two_elements",
            BlockingPredicate::CommonThreeElements => "common_three_elements",
            BlockingPredicate::MagnitudeOfCardinality => "magnitude_of_cardinality",
            BlockingPredicate::FirstSetElement => "first_set_element",
            BlockingPredicate::OrderOfMagnitude => "order_of_magnitude",
            BlockingPredicate::RoundTo1 => "round_to_1",
        }
    }
}

impl fmt::Display for BlockingPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Similarity-threshold predicate generators backed by an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPredicate {
    TfidfNgramCanopy,
    TfidfNgramSearch,
    TfidfSetSearch,
    TfidfSetCanopy,
}

impl IndexPredicate {
    pub fn name(self) -> &'static str {
        match self {
            IndexPredicate::TfidfNgramCanopy => "tfidf_ngram_canopy",
            IndexPredicate::TfidfNgramSearch => "tfidf_ngram_search",
            IndexPredicate::TfidfSetSearch => "tfidf_set_search",
            IndexPredicate::TfidfSetCanopy => "tfidf_set_canopy",
        }
    }
}

impl fmt::Display for IndexPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A blocking generator bound to the field it runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPredicate {
    pub field: String,
    pub generator: BlockingPredicate,
}

/// An index generator bound to a field and one similarity threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedPredicate {
    pub field: String,
    pub generator: IndexPredicate,
    pub threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_display() {
        for predicate in [
            BlockingPredicate::WholeSet,
            BlockingPredicate::MagnitudeOfCardinality,
            BlockingPredicate::SameThreeCharStart,
            BlockingPredicate::RoundTo1,
        ] {
            let json = serde_json::to_string(&predicate).unwrap();
            assert_eq!(json, format!("\"{}\"", predicate));
        }

        let json = serde_json::to_string(&IndexPredicate::TfidfSetCanopy).unwrap();
        assert_eq!(json, "\"tfidf_set_canopy\"");
    }
}
