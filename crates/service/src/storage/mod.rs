//! Key-value storage abstractions for the service layer
//!
//! The cart persists one serialized value under a fixed key. Backends only
//! need `get`/`set` on text values; the file-backed store plays the role of
//! device-local storage and the memory store backs tests and ephemeral sessions.

use async_trait::async_trait;
use thiserror::Error;

pub mod json_file_store;
pub mod memory;

pub use json_file_store::JsonFileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Text key-value storage, the only contract the cart relies on for durability.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
