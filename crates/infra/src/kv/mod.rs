//! Key-value storage boundary for draft persistence.
//!
//! The draft repository only needs string keys and string values; where they
//! end up (memory, a JSON file) is decided by the implementation.

pub mod file;
pub mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

use std::sync::Arc;

use thiserror::Error;

/// Storage operation error.
///
/// These are infrastructure failures. None of them is fatal to the form: the
/// caller can report them and carry on with a default draft.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source,
        }
    }
}

/// String key/value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Overwrite several keys as one write from the caller's point of view.
    fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(&key, value)?;
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        (**self).remove_many(keys)
    }
}
