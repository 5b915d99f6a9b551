//! Error types for the ledger store
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. License-binding mismatch is deliberately *not* here:
//! it is a first-class application state (`BindingState`), not an error.

use std::io;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ledger store
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from a host storage backend
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The stored snapshot exists but cannot be decoded.
    ///
    /// Fatal at boot: distinct from "no snapshot exists", and never a
    /// silent fallback to an empty database.
    #[error("stored snapshot is unreadable: {0}")]
    SnapshotUnreadable(String),

    /// No table with the given key exists in the engine
    #[error("no table named {0:?}")]
    UnknownTable(String),

    /// The input carries a field the table definition does not declare
    #[error("table {table:?} has no field {field:?}")]
    UnknownField {
        /// Table key
        table: String,
        /// Offending field name
        field: String,
    },

    /// A value's kind does not match the column's storage type
    #[error("field {field:?} expects a {expected} value, got {actual}")]
    TypeMismatch {
        /// Field name
        field: String,
        /// Storage type the column expects
        expected: &'static str,
        /// Kind of value actually supplied
        actual: &'static str,
    },

    /// Update targeted a row id that does not exist
    #[error("row {id} not found in table {table:?}")]
    RowNotFound {
        /// Table key
        table: String,
        /// Missing row id
        id: i64,
    },

    /// An existing table lacks a column the running definition expects.
    ///
    /// Missing tables are reconciled by creating them; missing columns on
    /// existing tables are fatal and never auto-migrated.
    #[error("table {table:?} in the stored image is missing column {column:?}")]
    SchemaMismatch {
        /// Table key
        table: String,
        /// Missing column name
        column: String,
    },

    /// Writing the snapshot failed; the in-memory mutation was rolled back.
    ///
    /// The last known-good durable state predates the attempted mutation.
    #[error("snapshot write failed, mutation rolled back: {source}")]
    SnapshotWriteFailed {
        /// Underlying storage failure
        #[source]
        source: Box<Error>,
    },

    /// Writing the installation anchor failed after a successful profile save
    #[error("installation anchor write failed: {source}")]
    AnchorWriteFailed {
        /// Underlying storage failure
        #[source]
        source: Box<Error>,
    },

    /// A cascade delete could not be made durable and was rolled back whole
    #[error("cascade delete of {table:?} id {id} rolled back: {source}")]
    CascadeIncomplete {
        /// Root table of the cascade
        table: String,
        /// Root row id of the cascade
        id: i64,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
