//! The persistence port.
//!
//! Profile, history, and quota round-trip as JSON strings under fixed
//! keys, exactly like the original device-local storage. The port is a
//! plain key-value trait so tests can run against an in-memory map while
//! the CLI uses one file per key in a state directory.
//!
//! Corrupt stored state is a recoverable condition: readers surface
//! `StoreError::Corrupt` and the session resets that piece to its default.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Storage key for the serialized preference profile.
pub const PREFERENCES_KEY: &str = "indicai_user_preferences";
/// Storage key for the serialized interaction history.
pub const HISTORY_KEY: &str = "indicai_user_history";
/// Storage key for the serialized daily quota state.
pub const DAILY_CHOICES_KEY: &str = "indicai_daily_choices";

/// Errors from the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON under a key couldn't be parsed
    #[error("Stored state under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// State couldn't be serialized for writing
    #[error("Failed to encode state for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal key-value persistence port.
pub trait KeyValueStore {
    /// Read the raw string under a key; `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a raw string under a key, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and parse a typed value; `Ok(None)` when the key is absent.
pub fn read_state<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.read(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
    }
}

/// Serialize and write a typed value under a key.
pub fn write_state<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &raw)
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.read("missing").unwrap().is_none());

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));

        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_typed_round_trip() {
        let mut store = MemoryStore::new();
        write_state(&mut store, "nums", &vec![1, 2, 3]).unwrap();

        let back: Option<Vec<i32>> = read_state(&store, "nums").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_state_is_reported_not_swallowed() {
        let mut store = MemoryStore::new();
        store.write("bad", "{ not json").unwrap();

        let result: Result<Option<Vec<i32>>, StoreError> = read_state(&store, "bad");
        assert!(matches!(result, Err(StoreError::Corrupt { key, .. }) if key == "bad"));
    }

    #[test]
    fn test_absent_key_reads_as_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<i32>> = read_state(&store, "nothing").unwrap();
        assert!(value.is_none());
    }
}
