//! Persisted key/value storage for client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plays the role browser `localStorage` plays for a web client: a flat map
//! of string keys to string values that survives restarts. The session token
//! is the main tenant; [`load_json`]/[`save_json`] cover structured values.
//!
//! TRADE-OFFS
//! ==========
//! `FileStorage` rewrites the whole file on every write. The map is tiny, and
//! writing through a uniquely named temp file plus rename keeps a crash or a
//! concurrent writer in another process from leaving a half-written file
//! behind. All operations block; async callers go through
//! [`SessionToken::load`](crate::net::session::SessionToken::load).

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::net::error::ClientError;

/// String-keyed storage backend.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// Load a JSON value stored under `key`. Missing or malformed values read as `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get(key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value under `key`.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the backend write fails.
pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) -> Result<(), ClientError> {
    let raw = serde_json::to_string(value).map_err(ClientError::Encode)?;
    storage.set(key, &raw)
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self.entries.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-object file on disk, one top-level string field per key.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage backed by `path`. The file and its parent directory are
    /// created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let storage_err = |e: std::io::Error| ClientError::Storage(format!("{}: {e}", parent.display()));
        std::fs::create_dir_all(parent).map_err(storage_err)?;
        let raw = serde_json::to_string_pretty(entries).map_err(ClientError::Encode)?;
        // Same directory as the target so the rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(parent).map_err(storage_err)?;
        tmp.write_all(raw.as_bytes()).map_err(storage_err)?;
        tmp.persist(&self.path)
            .map(|_| ())
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e.error)))
    }

    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), ClientError> {
        let _guard = self.lock.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let _guard = self.lock.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
