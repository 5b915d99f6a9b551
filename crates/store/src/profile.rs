//! Singleton site-profile accessor
//!
//! The profile table holds zero or one row, always at id 1. It carries the
//! village's descriptive identity fields plus the reserved
//! `installation_id` column, which belongs to the license binder: the
//! first save generates it, every later save preserves it verbatim, and a
//! caller-supplied value is discarded.

use crate::gateway::build_cells;
use crate::handle::Store;
use lumbung_core::{
    Error, FieldValues, Result, Row, Value, INSTALLATION_ID_FIELD, PROFILE_ROW_ID,
    PROFILE_TABLE_KEY,
};
use tracing::info;
use uuid::Uuid;

impl Store {
    /// Read the site profile, if one was ever saved
    ///
    /// A missing profile table reads as `None`, not an error.
    pub fn profile(&self) -> Result<Option<Row>> {
        match self.engine().table(PROFILE_TABLE_KEY) {
            None => Ok(None),
            Some(table) => Ok(table.get(PROFILE_ROW_ID)),
        }
    }

    /// Save the site profile (insert-or-replace at row id 1)
    ///
    /// On the first save a fresh installation id is generated, written
    /// with the row, and recorded in the installation anchor strictly
    /// after the snapshot write succeeds. The generating host therefore
    /// always matches itself (`Unbound` to `BoundMatch`). On later saves
    /// the stored installation id is preserved and the anchor untouched.
    pub fn save_profile(&mut self, fields: &FieldValues) -> Result<Row> {
        let def = self.catalog().profile().clone();

        // The reserved column is owned by the binder; drop whatever the
        // caller passed before validating.
        let mut input = fields.clone();
        input.remove(INSTALLATION_ID_FIELD);

        let existing_token = self
            .profile()?
            .as_ref()
            .and_then(|row| row.get_text(INSTALLATION_ID_FIELD).map(str::to_string));
        let (token, generated) = match existing_token {
            Some(token) => (token, false),
            None => (Uuid::new_v4().to_string(), true),
        };
        input.insert(
            INSTALLATION_ID_FIELD.to_string(),
            Value::text(token.clone()),
        );

        let cells = build_cells(&def, &input)?;
        self.mutate(&[PROFILE_TABLE_KEY], move |engine| {
            engine
                .table_mut_or_err(PROFILE_TABLE_KEY)?
                .put_at(PROFILE_ROW_ID, cells);
            Ok(())
        })?;

        if generated {
            self.anchor()
                .store(&token)
                .map_err(|e| Error::AnchorWriteFailed {
                    source: Box::new(e),
                })?;
            info!("installation id generated and anchored");
        }

        match self.profile()? {
            Some(row) => Ok(row),
            // Unreachable after a successful put_at; kept for the type.
            None => Err(Error::RowNotFound {
                table: PROFILE_TABLE_KEY.to_string(),
                id: PROFILE_ROW_ID,
            }),
        }
    }
}
