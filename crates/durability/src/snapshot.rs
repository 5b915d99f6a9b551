//! Snapshot store backends
//!
//! The durable snapshot store holds exactly one entry: the last serialized
//! database image. The file backend writes atomically (temp file + rename)
//! so a crash mid-write never clobbers the previous good image.

use lumbung_core::{Result, SnapshotStore};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed snapshot store
///
/// Holds the image at a fixed path. Writes go to a sibling `.tmp` file,
/// are synced, then renamed over the target.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by the given file path
    ///
    /// The parent directory is created if missing; the file itself is not
    /// touched until the first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(FileSnapshotStore { path })
    }

    /// Path of the stored image
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(blob) => {
                debug!(path = %self.path.display(), bytes = blob.len(), "snapshot loaded");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, blob: &[u8]) -> Result<()> {
        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(blob)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = blob.len(), "snapshot written");
        Ok(())
    }
}

/// In-memory snapshot store, for tests and ephemeral databases
#[derive(Default)]
pub struct MemorySnapshotStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with an image (restore-style tests)
    pub fn with_blob(blob: Vec<u8>) -> Self {
        MemorySnapshotStore {
            blob: Mutex::new(Some(blob)),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.blob.lock().clone())
    }

    fn store(&self, blob: &[u8]) -> Result<()> {
        *self.blob.lock() = Some(blob.to_vec());
        Ok(())
    }
}
