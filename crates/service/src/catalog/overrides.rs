use std::sync::Mutex;

use async_trait::async_trait;
use models::ServiceListing;

use crate::errors::ServiceError;

/// Local override layer holding the full listings collection.
/// Read once at initialization, rewritten in full after every mutation.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// `Ok(None)` means nothing has been saved yet.
    async fn load(&self) -> Result<Option<Vec<ServiceListing>>, ServiceError>;
    async fn save(&self, listings: &[ServiceListing]) -> Result<(), ServiceError>;
}

/// Process-local override layer. Used when no override file is configured
/// and in tests.
#[derive(Default)]
pub struct MemoryOverrideStore {
    slot: Mutex<Option<Vec<ServiceListing>>>,
}

impl MemoryOverrideStore {
    pub fn with_listings(listings: Vec<ServiceListing>) -> Self {
        Self { slot: Mutex::new(Some(listings)) }
    }

    pub fn snapshot(&self) -> Option<Vec<ServiceListing>> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

#[async_trait]
impl OverrideStore for MemoryOverrideStore {
    async fn load(&self) -> Result<Option<Vec<ServiceListing>>, ServiceError> {
        let slot = self.slot.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(slot.clone())
    }

    async fn save(&self, listings: &[ServiceListing]) -> Result<(), ServiceError> {
        let mut slot = self.slot.lock().map_err(|e| ServiceError::Storage(e.to_string()))?;
        *slot = Some(listings.to_vec());
        Ok(())
    }
}
