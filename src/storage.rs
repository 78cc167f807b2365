//! Locally persisted client state (session, preferences).
//!
//! Values are read when a client or controller is created and written back on
//! every change. Every `CalorieTracker` holds its own handle, there is no
//! process-wide cache.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};

/// A small key/value store holding JSON values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed helpers over any store.
pub trait KeyValueStoreExt: KeyValueStore {
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-memory store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON file.
///
/// The whole document is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    Error::session(format!("corrupt state file {}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        // Memory only changes once the file does.
        self.flush(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.flush(&next)?;
        *values = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.set("theme", json!("dark")).unwrap();
        assert_eq!(store.get("theme").unwrap(), Some(json!("dark")));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set_as("count", &3).unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_as::<i32>("count").unwrap(), Some(3));
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::open(&path).unwrap();
        store.set_as("count", &1).unwrap();

        // A directory in place of the file makes every flush fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set_as("count", &2).is_err());
        assert!(store.remove("count").is_err());
        assert_eq!(store.get_as::<i32>("count").unwrap(), Some(1));
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        match FileStore::open(&path) {
            Err(Error::Session(msg)) => assert!(msg.contains("corrupt")),
            other => panic!("Expected Session error, got {:?}", other),
        }
    }
}
