//! Schema definitions
//!
//! A schema is the ordered list of declared field types for one data
//! model. It is built once, validated, and read-only afterwards.

use crate::field_type::{FieldDefinition, FieldKind, FieldType};
use crate::predicates::{FieldPredicate, IndexedPredicate};
use std::collections::HashSet;
use std::path::Path;

/// Declared field types, in definition order
///
/// `Schema::default()` declares no fields; every field then resolves to the
/// canonicalizer's default comparator.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldType>,
}

impl Schema {
    /// Build and validate a schema from field definitions
    pub fn new(definitions: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        if definitions.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.field.as_str()) {
                return Err(SchemaError::DuplicateField(definition.field.clone()));
            }
        }

        let fields = definitions
            .into_iter()
            .map(FieldType::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }

    /// Parse a JSON array of field definitions
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let definitions: Vec<FieldDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the definitions, defaults filled in
    pub fn to_json(&self) -> Result<String, SchemaError> {
        let definitions: Vec<&FieldDefinition> =
            self.fields.iter().map(FieldType::definition).collect();
        Ok(serde_json::to_string_pretty(&definitions)?)
    }

    /// Get a field type by field name
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldType::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Blocking predicates of every field, in field then table order
    pub fn blocking_predicates(&self) -> Vec<FieldPredicate> {
        self.fields
            .iter()
            .flat_map(FieldType::blocking_predicates)
            .collect()
    }

    /// Indexed predicates of every field, in field then generator order
    pub fn indexed_predicates(&self) -> Vec<IndexedPredicate> {
        self.fields
            .iter()
            .flat_map(FieldType::indexed_predicates)
            .collect()
    }
}

/// Errors raised while building a schema or canonicalizing against it
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("Field '{0}' is defined more than once")]
    DuplicateField(String),

    #[error("Field '{field}': {kind} fields do not accept option '{option}'")]
    UnsupportedOption {
        field: String,
        kind: FieldKind,
        option: &'static str,
    },

    #[error("Cannot build a canonical record from an empty cluster")]
    EmptyCluster,

    #[error("No comparator configured for field '{0}'")]
    NoComparator(String),

    #[error("Field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: dedupx_core::Error,
    },

    #[error("Invalid schema JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let schema = Schema::new(vec![
            FieldDefinition::string("name"),
            FieldDefinition::price("price"),
            FieldDefinition::set("tags"),
        ])
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["name", "price", "tags"]);
        assert_eq!(schema.field("tags").unwrap().kind(), FieldKind::Set);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_empty_schema_error() {
        assert!(matches!(Schema::new(vec![]), Err(SchemaError::EmptySchema)));
        assert!(Schema::default().is_empty());
    }

    #[test]
    fn test_duplicate_field_error() {
        let result = Schema::new(vec![
            FieldDefinition::string("name"),
            FieldDefinition::set("name"),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "name"));
    }

    #[test]
    fn test_from_json() {
        let schema = Schema::from_json(
            r#"[
                {"field": "name", "type": "String", "metric": "trigram"},
                {"field": "cuisine", "type": "Set", "corpus": [["pizza"], ["sushi"]]}
            ]"#,
        )
        .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field("cuisine").unwrap().definition().corpus.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let result = Schema::from_json(r#"[{"field": "x", "type": "LatLong"}]"#);
        assert!(matches!(result, Err(SchemaError::Parse(_))));
    }

    #[test]
    fn test_from_json_rejects_unknown_option() {
        let result = Schema::from_json(r#"[{"field": "x", "type": "Set", "stopwords": ["a"]}]"#);
        assert!(matches!(result, Err(SchemaError::Parse(_))));
    }

    #[test]
    fn test_to_json_fills_defaults() {
        let schema = Schema::new(vec![FieldDefinition::set("tags")]).unwrap();
        let json = schema.to_json().unwrap();
        let reparsed: Vec<FieldDefinition> = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed[0].corpus, Some(Vec::new()));
    }

    #[test]
    fn test_schema_predicates() {
        let schema =
            Schema::new(vec![FieldDefinition::exact("id"), FieldDefinition::set("tags")]).unwrap();
        let kinds: Vec<FieldKind> = schema.fields().iter().map(FieldType::kind).collect();
        assert_eq!(kinds, vec![FieldKind::Exact, FieldKind::Set]);

        let blocking = schema.blocking_predicates();
        assert_eq!(blocking.len(), 1 + 7);
        assert_eq!(blocking[0].field, "id");
        assert_eq!(schema.indexed_predicates().len(), 8);
    }
}
