//! Generic row gateway
//!
//! The only way application code touches ledger data. Each operation is
//! parameterized by the ledger's table key; the catalog supplies the field
//! descriptor list. Every successful mutation ends with a full snapshot
//! write.
//!
//! Validation is strict: a field name the definition does not declare is
//! rejected (`UnknownField`), as is a value whose kind does not match the
//! column type (`TypeMismatch`). Declared fields absent from the input are
//! written as null, both on insert and on update, which has full-row
//! overwrite semantics, not sparse-patch semantics.

use crate::handle::Store;
use lumbung_core::{Error, FieldValues, Result, Row, TableDef, Value, PROFILE_TABLE_KEY};
use tracing::warn;

/// Build the dense cell vector for a table from a validated field map
pub(crate) fn build_cells(def: &TableDef, fields: &FieldValues) -> Result<Vec<Option<Value>>> {
    for name in fields.keys() {
        if !def.has_field(name) {
            return Err(Error::UnknownField {
                table: def.key.clone(),
                field: name.clone(),
            });
        }
    }
    def.fields
        .iter()
        .map(|field| match fields.get(&field.name) {
            None => Ok(None),
            Some(value) => {
                let expected = field.column_type();
                if value.fits(expected) {
                    Ok(Some(value.clone()))
                } else {
                    Err(Error::TypeMismatch {
                        field: field.name.clone(),
                        expected: expected.name(),
                        actual: value.kind_name(),
                    })
                }
            }
        })
        .collect()
}

impl Store {
    fn ledger_def(&self, key: &str) -> Result<TableDef> {
        self.catalog()
            .ledger(key)
            .cloned()
            .ok_or_else(|| Error::UnknownTable(key.to_string()))
    }

    /// Full scan of a ledger table
    ///
    /// Column-to-field mapping is stable; null cells are absent from each
    /// row's map. A table the engine does not hold (a zero-field
    /// definition, or a ledger added after the image was written) reads as
    /// empty rather than erroring. The profile table is not readable here;
    /// use the profile accessor.
    pub fn select_all(&self, key: &str) -> Result<Vec<Row>> {
        if key == PROFILE_TABLE_KEY {
            warn!("select_all called for the profile table; returning empty");
            return Ok(Vec::new());
        }
        self.ledger_def(key)?;
        Ok(self
            .engine()
            .table(key)
            .map(|t| t.scan())
            .unwrap_or_default())
    }

    /// Insert a row, returning the engine-assigned id
    pub fn insert(&mut self, key: &str, fields: &FieldValues) -> Result<i64> {
        let def = self.ledger_def(key)?;
        let cells = build_cells(&def, fields)?;
        self.mutate(&[key], move |engine| {
            Ok(engine.table_mut_or_err(&def.key)?.insert(cells))
        })
    }

    /// Overwrite every declared field of an existing row
    ///
    /// Fails with `RowNotFound` when the id does not exist (zero rows
    /// affected).
    pub fn update(&mut self, key: &str, id: i64, fields: &FieldValues) -> Result<()> {
        let def = self.ledger_def(key)?;
        let cells = build_cells(&def, fields)?;
        self.mutate(&[key], move |engine| {
            if engine.table_mut_or_err(&def.key)?.overwrite(id, cells) {
                Ok(())
            } else {
                Err(Error::RowNotFound { table: def.key, id })
            }
        })
    }

    /// Delete a row
    ///
    /// Idempotent: deleting an absent id is `Ok` and, since the image is
    /// unchanged, skips the snapshot write.
    pub fn delete(&mut self, key: &str, id: i64) -> Result<()> {
        self.ledger_def(key)?;
        let present = self.engine().table(key).is_some_and(|t| t.contains(id));
        if !present {
            return Ok(());
        }
        self.mutate(&[key], move |engine| {
            engine.table_mut_or_err(key)?.remove(id);
            Ok(())
        })
    }
}
