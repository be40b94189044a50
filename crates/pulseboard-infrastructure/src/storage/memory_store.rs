//! In-memory key-value store.

use async_trait::async_trait;
use pulseboard_core::Result;
use pulseboard_core::storage::KeyValueStore;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-local [`KeyValueStore`]; contents vanish with the process.
///
/// Used by tests and by ephemeral runs that must not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        assert!(store.get("token").await.unwrap().is_none());

        store.set("token", "abc".to_string()).await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("abc".to_string()));

        store.remove("token").await.unwrap();
        assert!(store.get("token").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let store = MemoryKeyValueStore::new();
        assert!(store.remove("user").await.is_ok());
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryKeyValueStore::with_entries([("token", "t"), ("user", "{}")]);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("user").await.unwrap(), Some("{}".to_string()));
    }
}
