//! Cell values and materialized row records
//!
//! A cell is either text or a real number; null is represented by absence.
//! Rows read back from the engine omit null fields from their map entirely
//! rather than defaulting them.

use crate::field::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A non-null cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Text cell (also carries dates, enum options, and base64 blobs)
    Text(String),
    /// Real-valued cell
    Real(f64),
}

impl Value {
    /// Build a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Build a real value
    pub fn real(n: f64) -> Self {
        Value::Real(n)
    }

    /// Get the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Real(_) => None,
        }
    }

    /// Get the numeric content, if this is a real value
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Kind name, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Real(_) => "real",
        }
    }

    /// Whether this value can be stored in a column of the given type
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Text(_), ColumnType::Text) | (Value::Real(_), ColumnType::Real)
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Real(n as f64)
    }
}

/// Field name to value map, as accepted by the gateway
///
/// Declared fields absent from the map are written as null.
pub type FieldValues = BTreeMap<String, Value>;

/// A materialized row record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Engine-assigned id, monotonic per table, immutable after insert
    pub id: i64,
    /// Non-null field values; null fields are absent from the map
    pub fields: FieldValues,
}

impl Row {
    /// Create a row record
    pub fn new(id: i64, fields: FieldValues) -> Self {
        Row { id, fields }
    }

    /// Value of a field, or `None` when null/absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Text content of a field, or `None` when null or non-text
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Numeric content of a field, or `None` when null or non-numeric
    pub fn get_real(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_fits_column_types() {
        assert!(Value::text("a").fits(ColumnType::Text));
        assert!(Value::real(1.0).fits(ColumnType::Real));
        assert!(!Value::text("a").fits(ColumnType::Real));
        assert!(!Value::real(1.0).fits(ColumnType::Text));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(3i64), Value::Real(3.0));
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::text("Sukamaju");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);

        let value = Value::real(42.5);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
    }

    #[test]
    fn test_row_accessors() {
        let mut fields = FieldValues::new();
        fields.insert("name".to_string(), Value::text("Sukamaju"));
        fields.insert("hamlets".to_string(), Value::real(4.0));
        let row = Row::new(1, fields);

        assert_eq!(row.get_text("name"), Some("Sukamaju"));
        assert_eq!(row.get_real("hamlets"), Some(4.0));
        assert!(row.get("absent").is_none());
    }
}
