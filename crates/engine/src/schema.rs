//! Schema synthesis
//!
//! Turns a declarative [`TableDef`] into a physical table schema: an
//! implicit `id` primary key plus one column per field descriptor, typed
//! by the exhaustive `FieldKind -> ColumnType` mapping. Pure and
//! side-effect-free; table creation is conditional on absence and lives on
//! [`Engine`](crate::Engine).

use lumbung_core::{ColumnType, TableDef};
use serde::{Deserialize, Serialize};

/// A synthesized column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (equals the field name)
    pub name: String,
    /// Storage type
    pub ty: ColumnType,
}

/// Physical schema of one table
///
/// The `id` primary key is implicit and not listed in `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name (equals the definition key)
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether the schema has a column with this name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// Synthesize the physical schema for a table definition
pub fn synthesize(def: &TableDef) -> TableSchema {
    TableSchema {
        name: def.key.clone(),
        columns: def
            .fields
            .iter()
            .map(|f| Column {
                name: f.name.clone(),
                ty: f.column_type(),
            })
            .collect(),
    }
}
