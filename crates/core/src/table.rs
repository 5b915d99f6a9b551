//! Table definitions
//!
//! One [`TableDef`] per administrative ledger. Definitions are fixed at
//! boot and reconciled against the live engine; they are never altered
//! after deploy.

use crate::field::FieldDef;
use serde::{Deserialize, Serialize};

/// Reserved table key for the singleton site profile
pub const PROFILE_TABLE_KEY: &str = "site_profile";

/// Fixed row id of the site profile record
pub const PROFILE_ROW_ID: i64 = 1;

/// Reserved profile column holding the license-binding token
///
/// Not part of any declarative field list shown to forms; appended to the
/// profile table's columns by the store.
pub const INSTALLATION_ID_FIELD: &str = "installation_id";

/// A named, ordered list of field descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table key (also the physical table name)
    pub key: String,
    /// Declared fields, in column order
    pub fields: Vec<FieldDef>,
}

impl TableDef {
    /// Create a table definition
    pub fn new(key: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        TableDef {
            key: key.into(),
            fields,
        }
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the definition declares a field with this name
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether this is the reserved site-profile table
    pub fn is_profile(&self) -> bool {
        self.key == PROFILE_TABLE_KEY
    }
}
