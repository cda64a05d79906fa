//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the override directory exists; warn when the catalog data dir is missing.
pub async fn ensure_env(catalog_dir: &str, override_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(catalog_dir).await.is_err() {
        warn!(%catalog_dir, "catalog data directory not found; catalog will start empty");
    }
    tokio::fs::create_dir_all(override_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {override_dir}: {e}"))?;
    Ok(())
}
