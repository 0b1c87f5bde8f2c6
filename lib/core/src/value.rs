//! Field values
//!
//! A [`FieldValue`] is one observation of one field in one record. Values
//! deserialize from plain JSON: `null`, booleans, numbers, strings and
//! arrays of strings (set-valued fields). Numbers keep the representation
//! they were read with, so integers round-trip exactly.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A single observed value of a record field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent or explicitly null
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// Set-valued field; element order is the order observed in the source
    Set(Vec<String>),
}

/// Discriminant of a [`FieldValue`], used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Text,
    Set,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Set => "set",
        };
        f.write_str(name)
    }
}

impl FieldValue {
    /// Whether this value counts as "no data" for canonicalization.
    ///
    /// Null, `false`, zero, the empty string and the empty set are empty.
    /// A record reporting an empty value never competes for the canonical
    /// value of that field.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Set(elements) => elements.is_empty(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Null => ValueKind::Null,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Set(_) => ValueKind::Set,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value as `f64`, possibly rounded for very large integers
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_set(&self) -> Option<&[String]> {
        match self {
            FieldValue::Set(elements) => Some(elements),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Set(elements) => f.write_str(&elements.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// NaN and infinities have no JSON form and become [`FieldValue::Null`]
impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(elements: Vec<String>) -> Self {
        FieldValue::Set(elements)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(elements: Vec<&str>) -> Self {
        FieldValue::Set(elements.into_iter().map(str::to_string).collect())
    }
}
