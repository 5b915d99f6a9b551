//! Backup and restore
//!
//! `export` hands out the framed full image, byte-compatible with the
//! durable snapshot; `restore` replaces the live engine wholesale. The
//! installation anchor is deliberately untouched by restore: an image
//! activated on another machine restores into `BoundMismatch`, which is
//! the enforcement point for the one-install-per-dataset policy.

use crate::handle::Store;
use crate::license::BindingState;
use chrono::NaiveDateTime;
use lumbung_core::{Error, Result};
use lumbung_durability::{decode_frame, encode_frame};
use lumbung_engine::Engine;
use tracing::info;

/// Timestamped filename hint for a user-triggered backup download
pub fn export_file_name(at: NaiveDateTime) -> String {
    format!("village_ledger_backup_{}.db", at.format("%Y%m%d_%H%M%S"))
}

impl Store {
    /// Serialize the full live image, with no transformation or redaction
    pub fn export(&self) -> Result<Vec<u8>> {
        let payload = self.engine().to_bytes()?;
        Ok(encode_frame(&payload))
    }

    /// Replace the live engine with an imported image
    ///
    /// Decodes the blob (`SnapshotUnreadable` on corrupt input), then
    /// reconciles the catalog against it: a table the image lacks is
    /// created (an older image importing into a newer deployment), while
    /// a missing column on an existing table is a fatal `SchemaMismatch`
    /// and leaves the live engine untouched. On success the new image is
    /// persisted and the recomputed binding state returned.
    pub fn restore(&mut self, blob: &[u8]) -> Result<BindingState> {
        let payload = decode_frame(blob)?;
        let mut engine = Engine::from_bytes(payload)?;
        engine.reconcile(self.catalog().defs())?;

        let previous = self.swap_engine(engine);
        if let Err(e) = self.persist() {
            self.swap_engine(previous);
            return Err(Error::SnapshotWriteFailed {
                source: Box::new(e),
            });
        }

        let state = self.binding_state()?;
        info!(locked = state.is_locked(), "image restored");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_file_name_format() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(
            export_file_name(at),
            "village_ledger_backup_20240307_140509.db"
        );
    }
}
