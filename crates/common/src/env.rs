//! Environment/runtime helpers
//!
//! Sanity checks to ensure the storage location is usable at startup.

use std::path::Path;

use tracing::{info, warn};

/// Make sure the parent directory of the storage file exists.
pub async fn ensure_storage_dir(storage_path: &str) -> anyhow::Result<()> {
    let parent = match Path::new(storage_path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "storage directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(%storage_path, "storage location ready");
    Ok(())
}
