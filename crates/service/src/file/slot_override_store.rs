use std::sync::Arc;

use async_trait::async_trait;
use models::ServiceListing;

use crate::catalog::OverrideStore;
use crate::errors::ServiceError;
use crate::storage::json_slot_store::JsonSlotStore;

/// Default slot holding the listings collection.
pub const DEFAULT_SLOT: &str = "services_data";

/// File-backed override layer: one named slot in a JSON slot file holds the
/// full listings collection.
#[derive(Clone)]
pub struct SlotOverrideStore {
    store: Arc<JsonSlotStore<Vec<ServiceListing>>>,
    slot: String,
}

impl SlotOverrideStore {
    /// Open the slot file at `path`. Creates the file if missing.
    pub async fn open<P: Into<std::path::PathBuf>>(path: P, slot: impl Into<String>) -> Result<Arc<Self>, ServiceError> {
        let store = JsonSlotStore::open(path).await?;
        Ok(Arc::new(Self { store, slot: slot.into() }))
    }

    /// Drop everything saved in the slot; the next process start sees only source data.
    pub async fn clear(&self) -> Result<bool, ServiceError> {
        self.store.remove(&self.slot).await
    }
}

#[async_trait]
impl OverrideStore for SlotOverrideStore {
    async fn load(&self) -> Result<Option<Vec<ServiceListing>>, ServiceError> {
        Ok(self.store.get(&self.slot).await)
    }

    async fn save(&self, listings: &[ServiceListing]) -> Result<(), ServiceError> {
        self.store.put(&self.slot, listings.to_vec()).await
    }
}
