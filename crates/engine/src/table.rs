//! One physical table
//!
//! Rows are dense cell vectors aligned with the schema's column order;
//! null cells are `None`. The id counter is monotonic for the lifetime of
//! the table and is part of the serialized image, so an id is never reused
//! even across restarts or after deletion.

use crate::schema::TableSchema;
use lumbung_core::{FieldValues, Row, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A physical table: schema, rows, and the next-id counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    schema: TableSchema,
    next_id: i64,
    rows: BTreeMap<i64, Vec<Option<Value>>>,
}

impl Table {
    /// Create an empty table for the given schema
    pub fn new(schema: TableSchema) -> Self {
        Table {
            schema,
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    /// The table's schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row, assigning the next monotonic id
    ///
    /// `cells` must be aligned with the schema's column order.
    pub fn insert(&mut self, cells: Vec<Option<Value>>) -> i64 {
        debug_assert_eq!(cells.len(), self.schema.columns.len());
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, cells);
        id
    }

    /// Insert or replace the row at a fixed id (singleton rows)
    ///
    /// Keeps the id counter ahead of the written id so later inserts never
    /// collide with it.
    pub fn put_at(&mut self, id: i64, cells: Vec<Option<Value>>) {
        debug_assert_eq!(cells.len(), self.schema.columns.len());
        self.rows.insert(id, cells);
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    /// Overwrite every cell of an existing row
    ///
    /// Returns `false` when no row with this id exists (zero rows
    /// affected).
    pub fn overwrite(&mut self, id: i64, cells: Vec<Option<Value>>) -> bool {
        debug_assert_eq!(cells.len(), self.schema.columns.len());
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = cells;
                true
            }
            None => false,
        }
    }

    /// Remove a row; returns whether a row was actually removed
    pub fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Whether a row with this id exists
    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Materialize one row, nulls absent from the field map
    pub fn get(&self, id: i64) -> Option<Row> {
        self.rows.get(&id).map(|cells| self.materialize(id, cells))
    }

    /// Materialize every row in id order
    pub fn scan(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|(id, cells)| self.materialize(*id, cells))
            .collect()
    }

    /// Ids of rows whose column equals the given value
    ///
    /// Linear scan; the store has no indexes beyond the primary key.
    pub fn ids_where(&self, column: &str, value: &Value) -> Vec<i64> {
        let Some(idx) = self.schema.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|(_, cells)| cells[idx].as_ref() == Some(value))
            .map(|(id, _)| *id)
            .collect()
    }

    fn materialize(&self, id: i64, cells: &[Option<Value>]) -> Row {
        let mut fields = FieldValues::new();
        for (column, cell) in self.schema.columns.iter().zip(cells) {
            if let Some(value) = cell {
                fields.insert(column.name.clone(), value.clone());
            }
        }
        Row::new(id, fields)
    }
}
