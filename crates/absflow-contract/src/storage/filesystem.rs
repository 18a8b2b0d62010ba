//! Filesystem ledger store
//!
//! Each key is a file under the base directory; `/` in a key becomes a
//! directory level and `.dat` is appended. Used by the CLI for local runs.

use absflow_core::{LedgerStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// World state persisted as one file per key
#[derive(Debug, Clone)]
pub struct FilesystemLedgerStore {
    base_path: PathBuf,
}

impl FilesystemLedgerStore {
    /// Store rooted at `base_path`; the directory is created on first write
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Root directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, String> {
        if key.is_empty() {
            return Err("Key cannot be empty".to_string());
        }
        if key.contains('\\') || key.contains('\0') {
            return Err(format!("Key {key:?} contains a forbidden character"));
        }
        let mut path = self.base_path.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(format!("Key {key:?} has an invalid path segment"));
            }
            path.push(segment);
        }
        path.set_extension(match path.extension() {
            Some(ext) => format!("{}.dat", ext.to_string_lossy()),
            None => "dat".to_string(),
        });
        Ok(path)
    }
}

impl LedgerStore for FilesystemLedgerStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.file_path(key).map_err(StoreError::ReadFailed)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let path = self
            .file_path(key)
            .map_err(|reason| StoreError::InvalidKey { reason })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::WriteFailed(format!("Failed to create directory: {e}"))
            })?;
        }
        fs::write(&path, value)
            .map_err(|e| StoreError::WriteFailed(format!("Failed to write file: {e}")))?;
        tracing::debug!(key, path = %path.display(), "Stored value");
        Ok(())
    }
}
