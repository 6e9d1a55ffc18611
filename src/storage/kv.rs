//! Key/value persistence
//!
//! Whole-document JSON stores keyed by a short name. Callers always read and
//! write the complete value for a key; there is no partial update.

use std::fs;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde_json::Value;

use crate::storage::{get_data_dir, StorageError};

/// Synchronous keyed blob store
pub trait KeyValuePersistence: Send + Sync {
    /// Read the document stored under `key`, `None` if nothing was written yet
    fn read_all(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the document stored under `key`
    fn write_all(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// Keys end up as file names, so keep them to a safe alphabet
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Stores each key as `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the per-user data directory
    pub fn in_data_dir() -> Result<Self, StorageError> {
        Ok(Self::new(get_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValuePersistence for JsonFileStore {
    fn read_all(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            tracing::debug!("No stored document for '{}'", key);
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&json)?;
        Ok(Some(value))
    }

    fn write_all(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());
        Ok(())
    }
}

/// In-memory store, for tests and for running without a data directory
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValuePersistence for MemoryStore {
    fn read_all(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn write_all(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
