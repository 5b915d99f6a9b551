//! The owned store handle
//!
//! Exactly one [`Store`] is live per running application instance. It owns
//! the in-memory engine and the injected host storage backends; callers
//! receive it by reference, never through a global.

use crate::catalog::Catalog;
use lumbung_core::{AnchorStore, Error, Result, SnapshotStore};
use lumbung_durability::{decode_frame, encode_frame};
use lumbung_engine::{Engine, Table};
use std::sync::Arc;
use tracing::{debug, info};

/// The embedded ledger store
pub struct Store {
    engine: Engine,
    catalog: Catalog,
    snapshots: Arc<dyn SnapshotStore>,
    anchor: Arc<dyn AnchorStore>,
}

impl Store {
    /// Open the store, loading the last snapshot or bootstrapping schema
    ///
    /// With a stored snapshot: decode it (a corrupt or unreadable blob is
    /// fatal, surfaced as `SnapshotUnreadable`, and never silently
    /// replaced by an empty database), then reconcile the catalog against
    /// it: missing tables are created, while a missing column on an
    /// existing table is a `SchemaMismatch`.
    ///
    /// Without one: create an empty engine, synthesize every table
    /// including the site profile, and persist immediately so a fresh
    /// install has a durable, schema-complete snapshot.
    pub fn open(
        catalog: Catalog,
        snapshots: Arc<dyn SnapshotStore>,
        anchor: Arc<dyn AnchorStore>,
    ) -> Result<Store> {
        let loaded = snapshots.load()?;
        let fresh = loaded.is_none();

        let mut engine = match &loaded {
            Some(blob) => Engine::from_bytes(decode_frame(blob)?)?,
            None => Engine::new(),
        };
        let created = engine.reconcile(catalog.defs())?;

        let store = Store {
            engine,
            catalog,
            snapshots,
            anchor,
        };
        if fresh || created > 0 {
            store.persist()?;
        }
        info!(
            fresh,
            tables_created = created,
            tables = store.engine.table_keys().len(),
            "store opened"
        );
        Ok(store)
    }

    /// The catalog the store was opened with
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    pub(crate) fn anchor(&self) -> &Arc<dyn AnchorStore> {
        &self.anchor
    }

    pub(crate) fn swap_engine(&mut self, engine: Engine) -> Engine {
        std::mem::replace(&mut self.engine, engine)
    }

    /// Serialize the full image and write it to the snapshot store
    pub(crate) fn persist(&self) -> Result<()> {
        let payload = self.engine.to_bytes()?;
        let frame = encode_frame(&payload);
        self.snapshots.store(&frame)?;
        debug!(bytes = frame.len(), "image persisted");
        Ok(())
    }

    /// Run a mutation over the named tables, then persist the full image
    ///
    /// The named tables are saved before the closure runs. If the closure
    /// fails, or the snapshot write fails, they are restored wholesale and
    /// the durable state remains the prior image; a persist failure is
    /// reported as `SnapshotWriteFailed` so the caller knows the
    /// mutation's durability is unconfirmed.
    pub(crate) fn mutate<T>(
        &mut self,
        tables: &[&str],
        f: impl FnOnce(&mut Engine) -> Result<T>,
    ) -> Result<T> {
        let saved: Vec<(String, Option<Table>)> = tables
            .iter()
            .map(|key| (key.to_string(), self.engine.table(key).cloned()))
            .collect();

        let rollback = |engine: &mut Engine, saved: Vec<(String, Option<Table>)>| {
            for (key, table) in saved {
                if let Some(table) = table {
                    engine.put_table(key, table);
                }
            }
        };

        let out = match f(&mut self.engine) {
            Ok(out) => out,
            Err(e) => {
                rollback(&mut self.engine, saved);
                return Err(e);
            }
        };
        match self.persist() {
            Ok(()) => Ok(out),
            Err(e) => {
                rollback(&mut self.engine, saved);
                Err(Error::SnapshotWriteFailed {
                    source: Box::new(e),
                })
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
