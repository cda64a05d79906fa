use std::path::PathBuf;

use async_trait::async_trait;
use models::{Category, Provider, ServiceListing};
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use crate::catalog::source::{CatalogSource, CATEGORIES, PROVIDERS, SERVICES};
use crate::errors::ServiceError;

/// Catalog source reading `<name>.json` files from a data directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    async fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, ServiceError> {
        let path = self.resource_path(name);
        let bytes = fs::read(&path)
            .await
            .map_err(|e| ServiceError::Source(format!("read {}: {e}", path.display())))?;
        let items: Vec<T> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Source(format!("parse {}: {e}", path.display())))?;
        debug!(resource = name, count = items.len(), "read catalog file");
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch_listings(&self) -> Result<Vec<ServiceListing>, ServiceError> {
        self.read_collection(SERVICES).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.read_collection(CATEGORIES).await
    }

    async fn fetch_providers(&self) -> Result<Vec<Provider>, ServiceError> {
        self.read_collection(PROVIDERS).await
    }
}
