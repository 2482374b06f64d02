//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_storage_dir` without depending directly on `common`.

/// Ensure the directory holding the storage file exists.
pub async fn ensure_storage_dir(storage_path: &str) -> anyhow::Result<()> {
    common::env::ensure_storage_dir(storage_path).await
}
