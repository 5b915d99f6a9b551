//! Installation anchor backends
//!
//! The anchor is a single opaque string in host-local, non-synchronized
//! storage. It survives independently of the database image; a restore
//! deliberately does not touch it.

use lumbung_core::{AnchorStore, Result};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed anchor store (one token per file)
pub struct FileAnchorStore {
    path: PathBuf,
}

impl FileAnchorStore {
    /// Create a store backed by the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(FileAnchorStore { path })
    }
}

impl AnchorStore for FileAnchorStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(token.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

/// In-memory anchor store, for tests and ephemeral databases
#[derive(Default)]
pub struct MemoryAnchorStore {
    token: Mutex<Option<String>>,
}

impl MemoryAnchorStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token (mismatch-scenario tests)
    pub fn with_token(token: impl Into<String>) -> Self {
        MemoryAnchorStore {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl AnchorStore for MemoryAnchorStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }
}
