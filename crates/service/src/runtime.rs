//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the override directory exists; warn when the catalog data dir is missing.
pub async fn ensure_env(catalog_dir: &str, override_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(catalog_dir, override_dir).await
}
