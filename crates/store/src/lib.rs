//! Application-facing facade of the Lumbung ledger store
//!
//! The surrounding application owns exactly one [`Store`] per running
//! instance and passes it by reference; there is no ambient or static
//! access. All ledger data flows through the row gateway
//! ([`Store::select_all`], [`Store::insert`], [`Store::update`],
//! [`Store::delete`]), the profile accessor ([`Store::profile`],
//! [`Store::save_profile`]), and the cascade controller
//! ([`Store::delete_plan`], [`Store::delete_work_plan`]). Every mutation
//! re-serializes the full database image to the durable snapshot store
//! before returning; that whole-image write is the durability contract.
//!
//! # Quick start
//!
//! ```ignore
//! use lumbung_store::{Catalog, Store};
//! use lumbung_durability::{FileAnchorStore, FileSnapshotStore};
//! use std::sync::Arc;
//!
//! let snapshots = Arc::new(FileSnapshotStore::new("data/ledger.db")?);
//! let anchor = Arc::new(FileAnchorStore::new("data/install_token")?);
//! let mut store = Store::open(Catalog::village_office(), snapshots, anchor)?;
//!
//! let rows = store.select_all("plans")?;
//! ```
//!
//! # License binding
//!
//! [`Store::binding_state`] couples one physical install to one database
//! image. `BoundMismatch` is a full lockout: the shell must deny reads and
//! writes and present only a sign-out affordance. The only exit is an
//! operator-level reset of both the image and the anchor; this is a
//! product decision, not a recoverable error.

pub mod backup;
pub mod blob;
pub mod cascade;
pub mod catalog;
pub mod gateway;
pub mod handle;
pub mod license;
pub mod profile;

pub use backup::export_file_name;
pub use blob::{decode_blob, encode_blob};
pub use cascade::{
    BUDGET_LINES_TABLE, PARENT_PLAN_FIELD, PARENT_WORK_PLAN_FIELD, PLANS_TABLE, WORK_PLANS_TABLE,
};
pub use catalog::Catalog;
pub use handle::Store;
pub use license::BindingState;

// Re-export the vocabulary types callers need alongside the facade.
pub use lumbung_core::{
    Error, FieldDef, FieldKind, FieldValues, Result, Row, TableDef, Value, INSTALLATION_ID_FIELD,
    PROFILE_ROW_ID, PROFILE_TABLE_KEY,
};
