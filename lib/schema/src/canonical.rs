//! Canonical record assembly
//!
//! Builds one representative record for a cluster of duplicates by taking,
//! field by field, the centroid of the values the records actually report.
//! Records with an empty value for a field do not take part in choosing
//! that field's value.
//!
//! The field names come from the first record of the cluster: fields that
//! only later records carry are not part of the canonical record, and a
//! field missing from a later record reads as empty.

use crate::schema::{Schema, SchemaError};
use dedupx_core::{
    select_centroid_with, CanonicalRecord, Comparator, FieldValue, FirstInOrder, Record,
    SharedComparator, TieBreak,
};
use dedupx_similarity::StringDistance;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds canonical records against a schema
///
/// A field declared in the schema is compared with its field type's
/// comparator; any other field falls back to the default comparator, a
/// [`StringDistance`] unless replaced or removed.
#[derive(Clone)]
pub struct Canonicalizer {
    schema: Schema,
    default_comparator: Option<SharedComparator>,
    tie_break: Arc<dyn TieBreak>,
}

impl Canonicalizer {
    /// Create a canonicalizer for the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            default_comparator: Some(Arc::new(StringDistance::default())),
            tie_break: Arc::new(FirstInOrder),
        }
    }

    /// Replace the comparator used for fields the schema does not declare
    pub fn with_default_comparator(mut self, comparator: SharedComparator) -> Self {
        self.default_comparator = Some(comparator);
        self
    }

    /// Require every compared field to be declared in the schema
    pub fn without_default_comparator(mut self) -> Self {
        self.default_comparator = None;
        self
    }

    pub fn with_tie_break(mut self, tie_break: impl TieBreak + 'static) -> Self {
        self.tie_break = Arc::new(tie_break);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Comparator used for `field`
    pub fn comparator_for(&self, field: &str) -> Result<&dyn Comparator, SchemaError> {
        if let Some(field_type) = self.schema.field(field) {
            return Ok(field_type.comparator());
        }
        self.default_comparator
            .as_deref()
            .ok_or_else(|| SchemaError::NoComparator(field.to_string()))
    }

    /// Value used for `field` when no record in the cluster has one
    pub fn empty_value_for(&self, field: &str) -> FieldValue {
        self.schema
            .field(field)
            .map(|field_type| field_type.empty_value())
            .unwrap_or_else(|| FieldValue::Text(String::new()))
    }

    /// Canonical value among the non-empty `variants` of `field`
    pub fn canonical_value(
        &self,
        field: &str,
        variants: &[&FieldValue],
    ) -> Result<FieldValue, SchemaError> {
        let comparator = self.comparator_for(field)?;
        let centroid = select_centroid_with(variants, comparator, self.tie_break.as_ref())
            .map_err(|source| SchemaError::Field {
                field: field.to_string(),
                source,
            })?;
        Ok(centroid.clone())
    }

    /// Build the canonical record of `cluster`
    pub fn canonical_record(&self, cluster: &[Record]) -> Result<CanonicalRecord, SchemaError> {
        let first = cluster.first().ok_or(SchemaError::EmptyCluster)?;
        let mut canonical = Record::new();

        for field in first.field_names() {
            let variants: Vec<&FieldValue> = cluster
                .iter()
                .filter_map(|record| record.get_non_empty(field))
                .collect();

            if variants.is_empty() {
                trace!(field, "no record reports a value");
                canonical.insert(field, self.empty_value_for(field));
                continue;
            }

            let value = self.canonical_value(field, &variants)?;
            trace!(field, variants = variants.len(), "selected canonical value");
            canonical.insert(field, value);
        }

        debug!(
            records = cluster.len(),
            fields = canonical.len(),
            "built canonical record"
        );
        Ok(canonical)
    }

    /// Canonical record of every cluster, in order; stops at the first error
    pub fn canonical_records<C>(&self, clusters: &[C]) -> Result<Vec<CanonicalRecord>, SchemaError>
    where
        C: AsRef<[Record]>,
    {
        clusters
            .iter()
            .map(|cluster| self.canonical_record(cluster.as_ref()))
            .collect()
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(Schema::default())
    }
}

impl fmt::Debug for Canonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canonicalizer")
            .field("schema", &self.schema)
            .field("default_comparator", &self.default_comparator.is_some())
            .finish_non_exhaustive()
    }
}

/// Canonical record of `cluster` using the default string comparator for
/// every field
pub fn canonical_record(cluster: &[Record]) -> Result<CanonicalRecord, SchemaError> {
    Canonicalizer::default().canonical_record(cluster)
}
