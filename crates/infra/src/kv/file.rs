use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, StoreError};
use crate::config::StorageConfig;

type Entries = BTreeMap<String, String>;

/// Key-value store kept in a single JSON object file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so readers see either the old or the new contents. A missing file
/// reads as an empty store; a file that is not a JSON object fails reads and
/// is replaced by the next write.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open the store at the configured path, creating the parent directory.
    pub fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        Self::at(config.data_file.clone())
    }

    pub fn at(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw)
            .map_err(|err| StoreError::serialization(self.path.display().to_string(), err))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::serialization(self.path.display().to_string(), err))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the in-process write lock.
    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err @ StoreError::Serialization { .. }) => {
                tracing::warn!(path = %self.path.display(), error = %err, "replacing unreadable store file");
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, new_entries: Vec<(String, String)>) -> Result<(), StoreError> {
        self.update(|entries| entries.extend(new_entries))
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}
