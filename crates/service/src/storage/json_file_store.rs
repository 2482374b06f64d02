use std::{collections::HashMap, io, path::PathBuf, sync::Arc};
use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use super::{KeyValueStorage, StorageError};

/// JSON file-backed key-value storage.
///
/// Persists a `HashMap<String, String>` to a JSON file. Every `set` rewrites the
/// whole file while holding the write lock, so the file always reflects the
/// latest committed map.
#[derive(Clone)]
pub struct JsonFileStorage {
    inner: Arc<RwLock<HashMap<String, String>>>,
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Initialize the storage from a path. Creates the file with an empty map if missing.
    /// A corrupt file starts as an empty map; any other read failure is an error.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "storage file is corrupt; starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty: HashMap<String, String> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| StorageError::Serialization(e.to_string()))?)
                    .await
                    .map_err(|e| StorageError::Backend(e.to_string()))?;
                empty
            }
            Err(e) => return Err(StorageError::Backend(format!("cannot read {}: {e}", file_path.display()))),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    async fn save(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_vec(map).map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), value);
        self.save(&map).await
    }
}
