use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStorage, StorageError};

/// In-process storage. Nothing survives the process, but values are shared by
/// every store holding the same `Arc<MemoryStorage>`.
#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a previously persisted cart.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(key.into(), value.into());
        Self { map: RwLock::new(map) }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.map.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_and_set() -> Result<(), StorageError> {
        let storage = MemoryStorage::with_entry("a", "1");
        assert_eq!(storage.get("a").await?.as_deref(), Some("1"));
        assert_eq!(storage.get("b").await?, None);
        storage.set("a", "2".into()).await?;
        assert_eq!(storage.get("a").await?.as_deref(), Some("2"));
        Ok(())
    }
}
