//! The whole-image engine
//!
//! One [`Engine`] represents the entire database: every physical table,
//! keyed by table name. Serialization covers the full image including the
//! per-table id counters; the contract is that an image produced by
//! [`Engine::to_bytes`] is byte-for-byte loadable by [`Engine::from_bytes`].

use crate::schema::{synthesize, TableSchema};
use crate::table::Table;
use lumbung_core::{Error, Result, TableDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The in-memory relational engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Engine {
    tables: BTreeMap<String, Table>,
}

impl Engine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a table with this key exists
    pub fn has_table(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    /// Keys of every table, in sorted order
    pub fn table_keys(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Borrow a table
    pub fn table(&self, key: &str) -> Option<&Table> {
        self.tables.get(key)
    }

    /// Mutably borrow a table
    pub fn table_mut(&mut self, key: &str) -> Option<&mut Table> {
        self.tables.get_mut(key)
    }

    /// Borrow a table, failing with `UnknownTable`
    pub fn table_or_err(&self, key: &str) -> Result<&Table> {
        self.tables
            .get(key)
            .ok_or_else(|| Error::UnknownTable(key.to_string()))
    }

    /// Mutably borrow a table, failing with `UnknownTable`
    pub fn table_mut_or_err(&mut self, key: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(key)
            .ok_or_else(|| Error::UnknownTable(key.to_string()))
    }

    /// Replace a table wholesale (transaction rollback support)
    pub fn put_table(&mut self, key: impl Into<String>, table: Table) {
        self.tables.insert(key.into(), table);
    }

    /// Create a table for the schema if absent
    ///
    /// Idempotent: calling twice for the same schema neither errors nor
    /// alters existing data. Returns whether a table was created.
    pub fn create_table_if_absent(&mut self, schema: TableSchema) -> bool {
        if self.tables.contains_key(&schema.name) {
            return false;
        }
        debug!(table = %schema.name, columns = schema.columns.len(), "table created");
        self.tables
            .insert(schema.name.clone(), Table::new(schema));
        true
    }

    /// Reconcile the engine against a set of table definitions
    ///
    /// Creates any missing table (definitions with an empty field list are
    /// skipped). For tables that already exist, verifies that every
    /// declared column is present and fails with `SchemaMismatch` when one
    /// is missing; columns are never auto-migrated. Safe to call on every
    /// boot. Returns the number of tables created.
    pub fn reconcile(&mut self, defs: &[TableDef]) -> Result<usize> {
        let mut created = 0;
        for def in defs {
            if def.fields.is_empty() {
                continue;
            }
            match self.tables.get(&def.key) {
                None => {
                    self.create_table_if_absent(synthesize(def));
                    created += 1;
                }
                Some(table) => {
                    for field in &def.fields {
                        if !table.schema().has_column(&field.name) {
                            return Err(Error::SchemaMismatch {
                                table: def.key.clone(),
                                column: field.name.clone(),
                            });
                        }
                    }
                }
            }
        }
        if created > 0 {
            info!(created, "reconcile created missing tables");
        }
        Ok(created)
    }

    /// Serialize the full image
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a full image
    ///
    /// An undecodable payload is a corrupt snapshot, surfaced as
    /// `SnapshotUnreadable` so boot never silently falls back to an empty
    /// database.
    pub fn from_bytes(bytes: &[u8]) -> Result<Engine> {
        bincode::deserialize(bytes)
            .map_err(|e| Error::SnapshotUnreadable(format!("image payload: {e}")))
    }
}
