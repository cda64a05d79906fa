use std::path::PathBuf;

use models::{listing::next_id, NewListing, ServiceListing};
use tokio::fs;
use tracing::info;

use crate::errors::ServiceError;

/// Appends listings straight into a `services.json` file.
///
/// Read-modify-write with no file lock. In-process appends are serialized by
/// going through `CatalogStore::add_listing_via`; another process writing
/// the same file can still race.
#[derive(Clone, Debug)]
pub struct ListingFileWriter {
    path: PathBuf,
}

impl ListingFileWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<Vec<ServiceListing>, ServiceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ServiceError::Storage(format!("read {}: {e}", self.path.display()))),
        }
    }

    /// Append with id `max(file max + 1, min_id)` and rewrite the file.
    ///
    /// `min_id` lets a caller that tracks ids elsewhere keep the two in step.
    pub async fn append(&self, input: NewListing, min_id: u64) -> Result<ServiceListing, ServiceError> {
        let mut listings = self.read_all().await?;
        let listing = input.into_listing(next_id(&listings)?.max(min_id));
        listings.push(listing.clone());

        let data = serde_json::to_vec_pretty(&listings).map_err(|e| ServiceError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
            }
        }
        fs::write(&self.path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", self.path.display())))?;
        info!(id = listing.id, path = %self.path.display(), "listing appended to file");
        Ok(listing)
    }
}
