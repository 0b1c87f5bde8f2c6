//! # DedupX
//!
//! Canonical record synthesis for entity resolution.
//!
//! Given a cluster of records already matched as the same real-world
//! entity, DedupX builds one canonical record by choosing, for every field,
//! the reported value with the smallest average distance to all the others.
//! How values are compared is decided by the field's declared type.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install dedupx
//! dedupx canonical --clusters clusters.json --schema schema.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dedupx::prelude::*;
//!
//! let schema = Schema::new(vec![
//!     FieldDefinition::string("name"),
//!     FieldDefinition::set("tags"),
//! ])
//! .unwrap();
//!
//! let cluster = vec![
//!     Record::new().with("name", "Acme").with("tags", vec!["tools"]),
//!     Record::new().with("name", "").with("tags", vec!["tools", "hardware"]),
//! ];
//!
//! let canonical = Canonicalizer::new(schema).canonical_record(&cluster).unwrap();
//! assert_eq!(canonical.get("name"), Some(&FieldValue::from("Acme")));
//! ```
//!
//! ## Crate Structure
//!
//! - [`dedupx-core`](https://docs.rs/dedupx-core) - Values, records, comparators, centroid selection
//! - [`dedupx-similarity`](https://docs.rs/dedupx-similarity) - String, numeric and set comparators
//! - [`dedupx-schema`](https://docs.rs/dedupx-schema) - Field types, predicates, schema, canonicalizer

// Re-export core types
pub use dedupx_core::{
    centroid_index, select_centroid, select_centroid_with,
    Comparator, Distance, DistanceMatrix, SharedComparator,
    FieldValue, Record, CanonicalRecord, ValueKind,
    TieBreak, FirstInOrder, PreferLongest,
    Error, Result,
};

// Re-export comparators
pub use dedupx_similarity::{
    CosineSetSimilarity, ExactDistance, NumberDistance, StringDistance, StringMetric,
};

// Re-export schema
pub use dedupx_schema::{
    canonical_record, Canonicalizer,
    Schema, SchemaError,
    FieldDefinition, FieldKind, FieldType,
    BlockingPredicate, IndexPredicate, FieldPredicate, IndexedPredicate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Canonicalizer, Schema, SchemaError,
        FieldDefinition, FieldKind, FieldType,
        FieldValue, Record, CanonicalRecord,
        Comparator, SharedComparator, Distance,
        StringDistance, CosineSetSimilarity,
        FirstInOrder, PreferLongest, TieBreak,
        Error, Result,
    };
}
