//! Lumbung is an embedded ledger store for village record-keeping
//! applications.
//!
//! Lumbung synthesizes relational schemas at runtime from declarative field
//! lists, keeps the whole database in memory, and persists it as a single
//! opaque binary image to host-provided durable storage. It enforces a
//! singleton site-profile record, cascades deletes across the
//! plan → work-plan → budget-line hierarchy, and binds one dataset to one
//! physical install through the installation anchor.
//!
//! # Quick start
//!
//! ```ignore
//! use lumbung::{Catalog, Store, Value};
//! use lumbung_durability::{FileAnchorStore, FileSnapshotStore};
//! use std::sync::Arc;
//!
//! let snapshots = Arc::new(FileSnapshotStore::new("data/ledger.db")?);
//! let anchor = Arc::new(FileAnchorStore::new("data/install_token")?);
//! let mut store = Store::open(Catalog::village_office(), snapshots, anchor)?;
//!
//! if store.binding_state()?.is_locked() {
//!     // Full lockout: render the lock screen, offer sign-out only.
//! }
//! ```
//!
//! Internal layers (engine, durability framing) are not re-exported; the
//! store facade is the public surface.

pub use lumbung_store::*;
