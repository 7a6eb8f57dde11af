//! Durable key-value storage for study progress and preferences.
//!
//! Values are whole JSON documents; writes overwrite the previous value.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key holding the serialized answer history.
pub const HISTORY_KEY: &str = "pas-stats";

/// Key holding the dark theme preference.
pub const DARK_MODE_KEY: &str = "pas-dark-mode";

const APP_DIR_NAME: &str = "pas-study";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal storage interface the tracker and preferences are written against.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Reads `key` as JSON. Absent, unreadable or malformed values yield the
/// default; the reason is logged and never returned.
pub fn load_json_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring malformed value for {}: {}. Using defaults.", key, e);
                T::default()
            }
        },
        Ok(None) => {
            debug!("No stored value for {}", key);
            T::default()
        }
        Err(e) => {
            warn!("Failed to read {}: {}. Using defaults.", key, e);
            T::default()
        }
    }
}

/// Volatile store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Saved {} to {}", key, path.display());
        Ok(())
    }
}

/// Platform data directory for the app, or the working directory when the
/// platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh directory under the system temp dir, unique per test.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pas-study-test-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let dir = scratch_dir("file-store");
        {
            let mut store = FileStore::open(&dir).unwrap();
            assert_eq!(store.get(DARK_MODE_KEY).unwrap(), None);
            store.set(DARK_MODE_KEY, "true").unwrap();
        }

        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert!(dir.join("pas-dark-mode.json").exists());
        assert!(!dir.join("pas-dark-mode.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "{not json").unwrap();
        let dark: bool = load_json_or_default(&store, DARK_MODE_KEY);
        assert!(!dark);
    }

    #[test]
    fn test_save_json_then_load() {
        let mut store = MemoryStore::new();
        save_json(&mut store, DARK_MODE_KEY, &true).unwrap();
        let dark: bool = load_json_or_default(&store, DARK_MODE_KEY);
        assert!(dark);
    }
}
