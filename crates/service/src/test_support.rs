#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use models::{Category, NewListing, Provider, ServiceListing};

use crate::catalog::{CatalogSource, OverrideStore};
use crate::errors::ServiceError;

pub fn listing(id: u64, name: &str) -> ServiceListing {
    NewListing { name: name.into(), description: format!("{name} session"), price: 75.0, ..Default::default() }
        .into_listing(id)
}

pub fn category(id: u64, name: &str) -> Category {
    Category { id, name: name.into(), description: String::new(), color: "#8B5CF6".into() }
}

pub fn provider(id: u64, name: &str, email: &str) -> Provider {
    Provider {
        id,
        name: name.into(),
        email: email.into(),
        bio: String::new(),
        specialties: vec!["Reiki".into()],
        verified: true,
        phone: None,
        location: None,
    }
}

/// In-memory source with per-collection failure injection and a fetch counter.
pub struct FakeSource {
    listings: Vec<ServiceListing>,
    categories: Vec<Category>,
    providers: Vec<Provider>,
    fail_categories: bool,
    delay: Option<Duration>,
    pub listing_fetches: AtomicUsize,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            categories: vec![category(1, "Energy Healing")],
            providers: vec![provider(1, "Sarah Chen", "sarah@example.com")],
            fail_categories: false,
            delay: None,
            listing_fetches: AtomicUsize::new(0),
        }
    }
}

impl FakeSource {
    pub fn with_listings(listings: Vec<ServiceListing>) -> Self {
        Self { listings, ..Self::default() }
    }

    pub fn failing_categories(mut self) -> Self {
        self.fail_categories = true;
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_listings(&self) -> Result<Vec<ServiceListing>, ServiceError> {
        self.listing_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        Ok(self.listings.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        if self.fail_categories {
            return Err(ServiceError::Source("connection refused".into()));
        }
        Ok(self.categories.clone())
    }

    async fn fetch_providers(&self) -> Result<Vec<Provider>, ServiceError> {
        Ok(self.providers.clone())
    }
}

/// Override layer that fails on reads or on writes.
pub struct FailingOverrideStore {
    fail_load: bool,
    fail_save: bool,
}

impl FailingOverrideStore {
    pub fn on_load() -> Self {
        Self { fail_load: true, fail_save: false }
    }

    pub fn on_save() -> Self {
        Self { fail_load: false, fail_save: true }
    }
}

#[async_trait]
impl OverrideStore for FailingOverrideStore {
    async fn load(&self) -> Result<Option<Vec<ServiceListing>>, ServiceError> {
        if self.fail_load {
            return Err(ServiceError::Storage("slot file locked".into()));
        }
        Ok(None)
    }

    async fn save(&self, _listings: &[ServiceListing]) -> Result<(), ServiceError> {
        if self.fail_save {
            return Err(ServiceError::Storage("disk full".into()));
        }
        Ok(())
    }
}
