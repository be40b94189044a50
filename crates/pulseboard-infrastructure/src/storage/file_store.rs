//! File-backed key-value store.
//!
//! All keys live in one JSON object on disk. The map is cached in memory after
//! the first load so reads never hit the file system.

use async_trait::async_trait;
use pulseboard_core::storage::KeyValueStore;
use pulseboard_core::{PulseError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::atomic_json::AtomicJsonFile;
use crate::paths::PulsePaths;

type Entries = BTreeMap<String, String>;

/// [`KeyValueStore`] persisted to a JSON file.
///
/// # Example
///
/// ```ignore
/// use pulseboard_infrastructure::storage::JsonFileKeyValueStore;
///
/// let store = JsonFileKeyValueStore::open_default().await?;
/// store.set("token", "demo-jwt-token-1".to_string()).await?;
/// ```
#[derive(Clone)]
pub struct JsonFileKeyValueStore {
    /// Cached entries. Uses Mutex for thread-safe access.
    entries: Arc<Mutex<Entries>>,
    file: Arc<AtomicJsonFile<Entries>>,
}

impl JsonFileKeyValueStore {
    /// Opens the store at the default session file location.
    pub async fn open_default() -> Result<Self> {
        let path = PulsePaths::session_file()?;
        Self::open(path).await
    }

    /// Opens (or lazily creates) the store at `path` and loads its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let file = Arc::new(AtomicJsonFile::<Entries>::new(path));

        let loader = file.clone();
        let initial = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| PulseError::internal(format!("Failed to join task: {}", e)))??
            .unwrap_or_default();

        tracing::debug!(
            "[JsonFileKeyValueStore] Opened {:?} with {} entries",
            file.path(),
            initial.len()
        );

        Ok(Self {
            entries: Arc::new(Mutex::new(initial)),
            file,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Writes `entries` to disk while the cache lock is held by the caller.
    async fn persist(&self, entries: Entries) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.save(&entries))
            .await
            .map_err(|e| PulseError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.persist(next.clone()).await?;
        *entries = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(next.clone()).await?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = JsonFileKeyValueStore::open(path.clone()).await.unwrap();
        store.set("token", "demo-jwt-token-1".to_string()).await.unwrap();
        store.set("user", "{\"name\":\"x\"}".to_string()).await.unwrap();

        let reopened = JsonFileKeyValueStore::open(path).await.unwrap();
        assert_eq!(
            reopened.get("token").await.unwrap(),
            Some("demo-jwt-token-1".to_string())
        );
        assert_eq!(
            reopened.get("user").await.unwrap(),
            Some("{\"name\":\"x\"}".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = JsonFileKeyValueStore::open(path.clone()).await.unwrap();
        store.set("token", "t".to_string()).await.unwrap();
        store.remove("token").await.unwrap();
        store.remove("token").await.unwrap();

        let reopened = JsonFileKeyValueStore::open(path).await.unwrap();
        assert!(reopened.get("token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty_without_creating_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = JsonFileKeyValueStore::open(path.clone()).await.unwrap();
        assert!(store.get("token").await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let result = JsonFileKeyValueStore::open(path).await;
        assert!(matches!(result, Err(PulseError::Serialization { .. })));
    }
}
