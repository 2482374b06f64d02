#![cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::products::http::{HttpApi, HttpError};
use crate::storage::{KeyValueStorage, MemoryStorage, StorageError};

/// Memory-backed storage that counts writes and can be told to fail or stall.
#[derive(Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay: Duration,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set` sleeps before committing, leaving a window for overlapping calls.
    pub fn with_write_delay(write_delay: Duration) -> Self {
        Self { write_delay, ..Self::default() }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStorage for RecordingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read refused".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("disk full".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

/// `HttpApi` returning one canned response and recording requested paths.
pub struct CannedApi {
    response: Result<serde_json::Value, HttpError>,
    requested: Mutex<Vec<String>>,
}

impl CannedApi {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { response: Ok(body), requested: Mutex::new(Vec::new()) }
    }

    pub fn err(error: HttpError) -> Self {
        Self { response: Err(error), requested: Mutex::new(Vec::new()) }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpApi for CannedApi {
    async fn get(&self, path: &str) -> Result<serde_json::Value, HttpError> {
        self.requested.lock().unwrap().push(path.to_string());
        self.response.clone()
    }
}
