//! In-memory implementation of KeyValueStore for tests and embedding

use crate::core::KeyValueStore;
use crate::core::error::{Result, StoreError};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// Process-local key-value store
///
/// Keys enumerate in insertion order. Uses RwLock for thread-safe access;
/// clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<IndexMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::backend("memory", format!("failed to acquire lock: {}", e))
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        // shift_remove keeps the remaining keys in insertion order
        entries.shift_remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.keys().cloned().collect())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = InMemoryKeyValueStore::new();
        store.put("Client:1", "{}").unwrap();

        assert_eq!(store.get("Client:1").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("Client:2").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites() {
        let store = InMemoryKeyValueStore::new();
        store.put("k", "v1").unwrap();
        store.put("k", "v2").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let store = InMemoryKeyValueStore::new();
        store.put("b", "1").unwrap();
        store.put("a", "2").unwrap();
        store.put("c", "3").unwrap();
        store.delete("a").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryKeyValueStore::new();
        let handle = store.clone();
        handle.put("k", "v").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.clear().unwrap();
        assert!(handle.is_empty().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_a_backend_error() {
        let store = InMemoryKeyValueStore::new();
        let entries = Arc::clone(&store.entries);
        let _ = std::thread::spawn(move || {
            let _guard = entries.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let err = store.len().unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(store.is_empty().is_err());
        assert!(store.get("k").is_err());
    }
}
