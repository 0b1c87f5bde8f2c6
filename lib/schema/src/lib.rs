//! # DedupX Schema
//!
//! Field types and canonical record assembly for entity resolution.
//!
//! ## Overview
//!
//! Once a clustering step has grouped records that describe the same
//! entity, DedupX merges each group into one canonical record:
//!
//! 1. A [`Schema`] declares the type of each field (`String`, `Exact`,
//!    `Price`, `Set`)
//! 2. Each [`FieldType`] binds the comparator for its values, plus the
//!    blocking and index predicate generators used upstream to find
//!    candidate pairs
//! 3. The [`Canonicalizer`] picks, per field, the reported value closest on
//!    average to all the others
//!
//! ## Schema Definition
//!
//! ```rust
//! use dedupx_schema::{Canonicalizer, FieldDefinition, Schema};
//! use dedupx_core::{FieldValue, Record};
//!
//! let schema = Schema::new(vec![
//!     FieldDefinition::string("name"),
//!     FieldDefinition::set("cuisine"),
//! ])
//! .unwrap();
//!
//! let cluster = vec![
//!     Record::new().with("name", "Luigi's").with("cuisine", vec!["pizza", "italian"]),
//!     Record::new().with("name", "").with("cuisine", vec!["italian", "pizza"]),
//! ];
//!
//! let canonical = Canonicalizer::new(schema).canonical_record(&cluster).unwrap();
//! assert_eq!(canonical.get("name"), Some(&FieldValue::from("Luigi's")));
//! ```
//!
//! ## Merge Flow
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌─────────────┐
//! │   Cluster   │────>│ Canonicalizer │────>│  Canonical  │
//! │  (records)  │     │  (per field)  │     │   record    │
//! └─────────────┘     └───────────────┘     └─────────────┘
//!                             │
//!                      ┌──────┴──────┐
//!                      │  Centroid   │
//!                      │ (comparator)│
//!                      └─────────────┘
//! ```

pub mod canonical;
pub mod field_type;
pub mod predicates;
pub mod schema;

// Re-export main types
pub use canonical::{canonical_record, Canonicalizer};
pub use field_type::{FieldDefinition, FieldKind, FieldType};
pub use predicates::{BlockingPredicate, FieldPredicate, IndexPredicate, IndexedPredicate};
pub use schema::{Schema, SchemaError};
