//! Core types for the Lumbung ledger store
//!
//! This crate defines the foundational types used throughout the system:
//! - FieldKind / FieldDef: declarative field descriptors for ledger tables
//! - TableDef: a named, ordered list of field descriptors
//! - Value / Row: cell values and materialized row records
//! - Error: the error hierarchy
//! - Traits: host storage seams (SnapshotStore, AnchorStore)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod row;
pub mod table;
pub mod traits;

pub use error::{Error, Result};
pub use field::{ColumnType, FieldDef, FieldKind};
pub use row::{FieldValues, Row, Value};
pub use table::{TableDef, INSTALLATION_ID_FIELD, PROFILE_ROW_ID, PROFILE_TABLE_KEY};
pub use traits::{AnchorStore, SnapshotStore};
