//! Field descriptors and the storage-type mapping
//!
//! Ledger tables are declared as ordered lists of [`FieldDef`]s. The field
//! kind is a closed set; the mapping to a column storage type is exhaustive
//! and checked at compile time.

use serde::{Deserialize, Serialize};

/// Semantic kind of a declared field
///
/// Drives both the column storage type ([`FieldKind::column_type`]) and
/// form validation in the surrounding application (not enforced here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Short free text
    Text,
    /// Multi-line free text
    LongText,
    /// Numeric value (stored as a real-valued column)
    Number,
    /// Calendar date, carried as ISO-8601 text
    Date,
    /// One of a fixed set of options
    Enum,
    /// Binary payload, carried as base64-encoded text
    Blob,
}

/// Storage type of a synthesized column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Text-valued column
    Text,
    /// Real-valued column
    Real,
}

impl ColumnType {
    /// Human-readable name, used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Real => "real",
        }
    }
}

impl FieldKind {
    /// Map a field kind to its column storage type
    ///
    /// Only `Number` maps to a real-valued column; every other kind is
    /// stored as text (`Blob` as a base64 text payload).
    pub fn column_type(self) -> ColumnType {
        match self {
            FieldKind::Number => ColumnType::Real,
            FieldKind::Text
            | FieldKind::LongText
            | FieldKind::Date
            | FieldKind::Enum
            | FieldKind::Blob => ColumnType::Text,
        }
    }
}

/// A declared field of a ledger table
///
/// `required` and `enum_values` exist for the form layer; the store itself
/// validates only field names and value kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field (column) name
    pub name: String,
    /// Semantic kind
    pub kind: FieldKind,
    /// Whether the form layer must require a value
    pub required: bool,
    /// Allowed options for `Enum` fields
    pub enum_values: Option<Vec<String>>,
}

impl FieldDef {
    /// Create a field descriptor of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldDef {
            name: name.into(),
            kind,
            required: false,
            enum_values: None,
        }
    }

    /// Shorthand for a `Text` field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Shorthand for a `LongText` field
    pub fn long_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::LongText)
    }

    /// Shorthand for a `Number` field
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Shorthand for a `Date` field
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Shorthand for an `Enum` field with its allowed options
    pub fn choice(
        name: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut def = Self::new(name, FieldKind::Enum);
        def.enum_values = Some(options.into_iter().map(Into::into).collect());
        def
    }

    /// Shorthand for a `Blob` field
    pub fn blob(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Blob)
    }

    /// Mark the field as required (form-layer validation)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Storage type of the column synthesized for this field
    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_maps_to_real() {
        assert_eq!(FieldKind::Number.column_type(), ColumnType::Real);
    }

    #[test]
    fn test_everything_else_maps_to_text() {
        for kind in [
            FieldKind::Text,
            FieldKind::LongText,
            FieldKind::Date,
            FieldKind::Enum,
            FieldKind::Blob,
        ] {
            assert_eq!(kind.column_type(), ColumnType::Text);
        }
    }

    #[test]
    fn test_choice_records_options() {
        let def = FieldDef::choice("status", ["Draft", "Final"]);
        assert_eq!(def.kind, FieldKind::Enum);
        assert_eq!(
            def.enum_values.as_deref(),
            Some(&["Draft".to_string(), "Final".to_string()][..])
        );
    }

    #[test]
    fn test_required_builder() {
        let def = FieldDef::text("village_name").required();
        assert!(def.required);
        assert_eq!(def.name, "village_name");
    }
}
