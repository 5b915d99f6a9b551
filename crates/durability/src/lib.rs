//! Durable storage backends for the ledger store
//!
//! This crate provides:
//! - the snapshot frame codec (magic + format version + CRC32 checksum)
//! - file-backed [`SnapshotStore`]/[`AnchorStore`] implementations with
//!   atomic temp-file + rename writes
//! - in-memory implementations for tests and ephemeral use
//!
//! The frame wraps the engine's serialized payload; a frame that fails the
//! checksum or carries an unknown version decodes to `SnapshotUnreadable`.
//!
//! [`SnapshotStore`]: lumbung_core::SnapshotStore
//! [`AnchorStore`]: lumbung_core::AnchorStore

pub mod anchor;
pub mod codec;
pub mod snapshot;

pub use anchor::{FileAnchorStore, MemoryAnchorStore};
pub use codec::{decode_frame, encode_frame, FORMAT_VERSION};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore};
