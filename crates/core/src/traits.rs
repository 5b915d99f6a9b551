//! Host storage seams
//!
//! The host environment provides two pieces of durable storage: a blob
//! store holding exactly one entry (the last serialized database image)
//! and a host-local, non-synchronized slot for the installation anchor.
//! Both are injected into the store as trait objects.

use crate::error::Result;

/// Durable snapshot store: a single-entry blob store
///
/// `load` returning `Ok(None)` means no snapshot exists (a fresh install);
/// a present-but-undecodable blob is the *caller's* `SnapshotUnreadable`
/// condition, not this trait's concern.
pub trait SnapshotStore: Send + Sync {
    /// Read the last stored image, if any
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored image
    fn store(&self, blob: &[u8]) -> Result<()>;
}

/// Host-local slot for the installation anchor
///
/// The anchor survives independently of the database image. It is written
/// once, when the site profile first acquires an installation id, and is
/// never mutated by normal operation.
pub trait AnchorStore: Send + Sync {
    /// Read the anchor value, if one was ever written
    fn load(&self) -> Result<Option<String>>;

    /// Write the anchor value
    fn store(&self, token: &str) -> Result<()>;
}
