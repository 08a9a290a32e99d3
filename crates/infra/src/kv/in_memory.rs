use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StoreError};

/// In-memory key-value store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("note").unwrap(), None);

        store.set("note", "hello".to_string()).unwrap();
        assert_eq!(store.get("note").unwrap().as_deref(), Some("hello"));

        store.remove("note").unwrap();
        store.remove("note").unwrap();
        assert_eq!(store.get("note").unwrap(), None);
    }

    #[test]
    fn set_many_overwrites() {
        let store = InMemoryKeyValueStore::new();
        store.set("a", "1".to_string()).unwrap();
        store
            .set_many(vec![
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "3".to_string()),
            ])
            .unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("3"));

        store.remove_many(&["a", "b", "c"]).unwrap();
        for key in ["a", "b", "c"] {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn poisoned_lock_is_reported_as_unavailable() {
        let store = std::sync::Arc::new(InMemoryKeyValueStore::new());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.get("note"), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.set("note", "x".to_string()),
            Err(StoreError::Unavailable(_))
        ));
    }
}
