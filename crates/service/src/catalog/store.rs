use std::future::Future;
use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use chrono::Utc;
use common::metrics::{
    LISTINGS_CREATED_TOTAL, LISTINGS_DELETED_TOTAL, LISTINGS_UPDATED_TOTAL, OVERRIDE_WRITE_FAILURES_TOTAL,
    SOURCE_FETCH_FAILURES_TOTAL,
};
use models::{listing::next_id, CatalogExport, Category, ListingPatch, NewListing, Provider, ServiceListing};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{
    overrides::OverrideStore,
    reconcile::reconcile,
    source::{CatalogSource, CATEGORIES, PROVIDERS, SERVICES},
};
use crate::errors::ServiceError;

/// Lifecycle of a [`CatalogStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Uninitialized,
    Initializing,
    Ready,
}

const PHASE_UNINITIALIZED: u8 = 0;
const PHASE_INITIALIZING: u8 = 1;
const PHASE_READY: u8 = 2;

/// Result of a write: the in-memory value plus the outcome of the override write.
///
/// A failed override write does not undo the mutation; it is reported here
/// so callers can surface a warning.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub persist_error: Option<ServiceError>,
}

impl<T> Persisted<T> {
    fn new(value: T, persist_error: Option<ServiceError>) -> Self {
        Self { value, persist_error }
    }

    pub fn is_durable(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn warning(&self) -> Option<String> {
        self.persist_error.as_ref().map(|e| e.to_string())
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Default)]
struct CatalogData {
    listings: Vec<ServiceListing>,
    categories: Vec<Category>,
    providers: Vec<Provider>,
}

/// Session-scoped cache of the catalog.
///
/// Constructed once by the composition root and shared through `Arc`.
/// Every query awaits [`CatalogStore::initialize`] first; initialization runs
/// once and concurrent callers wait for the same run.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    overrides: Arc<dyn OverrideStore>,
    data: RwLock<CatalogData>,
    init: OnceCell<()>,
    phase: AtomicU8,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>, overrides: Arc<dyn OverrideStore>) -> Self {
        Self {
            source,
            overrides,
            data: RwLock::new(CatalogData::default()),
            init: OnceCell::new(),
            phase: AtomicU8::new(PHASE_UNINITIALIZED),
        }
    }

    pub fn state(&self) -> StorePhase {
        match self.phase.load(Ordering::Acquire) {
            PHASE_READY => StorePhase::Ready,
            PHASE_INITIALIZING => StorePhase::Initializing,
            _ => StorePhase::Uninitialized,
        }
    }

    /// Load the catalog once. Later calls return immediately.
    pub async fn initialize(&self) {
        self.init.get_or_init(|| self.load()).await;
    }

    async fn load(&self) {
        self.phase.store(PHASE_INITIALIZING, Ordering::Release);

        let (listings, categories, providers) = tokio::join!(
            self.source.fetch_listings(),
            self.source.fetch_categories(),
            self.source.fetch_providers(),
        );
        let listings = or_empty(SERVICES, listings);
        let categories = or_empty(CATEGORIES, categories);
        let providers = or_empty(PROVIDERS, providers);

        let listings = match self.overrides.load().await {
            Ok(Some(saved)) => {
                debug!(overrides = saved.len(), "merging override layer");
                reconcile(listings, &saved)
            }
            Ok(None) => listings,
            Err(e) => {
                warn!(error = %e, "override layer unreadable; using source data only");
                listings
            }
        };

        info!(
            services = listings.len(),
            categories = categories.len(),
            providers = providers.len(),
            "catalog loaded"
        );
        *self.data.write().await = CatalogData { listings, categories, providers };
        self.phase.store(PHASE_READY, Ordering::Release);
    }

    async fn persist(&self, listings: &[ServiceListing]) -> Option<ServiceError> {
        match self.overrides.save(listings).await {
            Ok(()) => None,
            Err(e) => {
                OVERRIDE_WRITE_FAILURES_TOTAL.inc();
                warn!(error = %e, count = listings.len(), "override write failed; change kept in memory only");
                Some(e)
            }
        }
    }

    async fn select<F>(&self, pred: F) -> Vec<ServiceListing>
    where
        F: Fn(&ServiceListing) -> bool,
    {
        self.initialize().await;
        let data = self.data.read().await;
        data.listings.iter().filter(|l| l.is_active() && pred(l)).cloned().collect()
    }

    /// Active listings in storage order.
    pub async fn get_all_listings(&self) -> Vec<ServiceListing> {
        self.select(|_| true).await
    }

    pub async fn get_listing_by_id(&self, id: u64) -> Option<ServiceListing> {
        self.initialize().await;
        let data = self.data.read().await;
        data.listings.iter().find(|l| l.id == id && l.is_active()).cloned()
    }

    /// Exact, case-sensitive match on the stored category.
    pub async fn get_listings_by_category(&self, category: &str) -> Vec<ServiceListing> {
        self.select(|l| l.category.as_deref() == Some(category)).await
    }

    /// Exact, case-sensitive match on the stored provider name.
    pub async fn get_listings_by_provider(&self, provider: &str) -> Vec<ServiceListing> {
        self.select(|l| l.provider.as_deref() == Some(provider)).await
    }

    /// Case-insensitive substring search over name, description and category.
    pub async fn search_listings(&self, query: &str) -> Vec<ServiceListing> {
        let needle = query.to_lowercase();
        self.select(|l| l.matches_lowercase(&needle)).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_listing(&self, input: NewListing) -> Result<Persisted<ServiceListing>, ServiceError> {
        self.initialize().await;
        let mut data = self.data.write().await;
        let listing = input.into_listing(next_id(&data.listings)?);
        data.listings.push(listing.clone());
        let persist_error = self.persist(&data.listings).await;
        LISTINGS_CREATED_TOTAL.inc();
        info!(id = listing.id, total = data.listings.len(), "listing added");
        Ok(Persisted::new(listing, persist_error))
    }

    /// Add a listing through a writer that assigns its own id, such as the
    /// source file writer.
    ///
    /// `write` receives the lowest id the store considers free and must not
    /// return a smaller one. The write lock is held across `write`, so the
    /// resulting id cannot collide with [`CatalogStore::add_listing`]. The
    /// written listing then enters memory and the override layer like any
    /// other addition.
    #[instrument(skip_all)]
    pub async fn add_listing_via<F, Fut>(&self, write: F) -> Result<Persisted<ServiceListing>, ServiceError>
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = Result<ServiceListing, ServiceError>>,
    {
        self.initialize().await;
        let mut data = self.data.write().await;
        let floor = next_id(&data.listings)?;
        let listing = write(floor).await?;
        if listing.id < floor {
            return Err(ServiceError::Validation(format!(
                "writer assigned id {} below the free floor {floor}",
                listing.id
            )));
        }
        data.listings.push(listing.clone());
        let persist_error = self.persist(&data.listings).await;
        LISTINGS_CREATED_TOTAL.inc();
        info!(id = listing.id, total = data.listings.len(), "listing added by external writer");
        Ok(Persisted::new(listing, persist_error))
    }

    /// Shallow-merge `patch` into the listing with `id`. Soft-deleted listings
    /// are still addressable here. `None` when no record has that id.
    #[instrument(skip(self, patch))]
    pub async fn update_listing(&self, id: u64, patch: ListingPatch) -> Option<Persisted<ServiceListing>> {
        self.initialize().await;
        let mut data = self.data.write().await;
        let Some(existing) = data.listings.iter_mut().find(|l| l.id == id) else {
            debug!("update for unknown listing");
            return None;
        };
        patch.apply_to(existing);
        let updated = existing.clone();
        let persist_error = self.persist(&data.listings).await;
        LISTINGS_UPDATED_TOTAL.inc();
        info!(id, "listing updated");
        Some(Persisted::new(updated, persist_error))
    }

    /// Soft delete: flips `active` to false. `value == false` when no record has that id.
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: u64) -> Persisted<bool> {
        self.initialize().await;
        let mut data = self.data.write().await;
        let Some(existing) = data.listings.iter_mut().find(|l| l.id == id) else {
            debug!("delete for unknown listing");
            return Persisted::new(false, None);
        };
        existing.active = false;
        let persist_error = self.persist(&data.listings).await;
        LISTINGS_DELETED_TOTAL.inc();
        info!(id, "listing soft-deleted");
        Persisted::new(true, persist_error)
    }

    pub async fn get_all_categories(&self) -> Vec<Category> {
        self.initialize().await;
        self.data.read().await.categories.clone()
    }

    pub async fn get_category_by_id(&self, id: u64) -> Option<Category> {
        self.initialize().await;
        self.data.read().await.categories.iter().find(|c| c.id == id).cloned()
    }

    pub async fn get_all_providers(&self) -> Vec<Provider> {
        self.initialize().await;
        self.data.read().await.providers.clone()
    }

    pub async fn get_provider_by_id(&self, id: u64) -> Option<Provider> {
        self.initialize().await;
        self.data.read().await.providers.iter().find(|p| p.id == id).cloned()
    }

    pub async fn get_provider_by_email(&self, email: &str) -> Option<Provider> {
        self.initialize().await;
        self.data.read().await.providers.iter().find(|p| p.email == email).cloned()
    }

    /// Everything held in memory, soft-deleted listings included.
    pub async fn export(&self) -> CatalogExport {
        self.initialize().await;
        let data = self.data.read().await;
        CatalogExport {
            services: data.listings.clone(),
            categories: data.categories.clone(),
            providers: data.providers.clone(),
            export_date: Utc::now(),
        }
    }
}

fn or_empty<T>(collection: &'static str, fetched: Result<Vec<T>, ServiceError>) -> Vec<T> {
    match fetched {
        Ok(items) => items,
        Err(e) => {
            SOURCE_FETCH_FAILURES_TOTAL.with_label_values(&[collection]).inc();
            warn!(collection, error = %e, "catalog fetch failed; using empty collection");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryOverrideStore;
    use crate::test_support::{listing, FailingOverrideStore, FakeSource};

    fn store_with(source: FakeSource, overrides: MemoryOverrideStore) -> (CatalogStore, Arc<MemoryOverrideStore>) {
        let overrides = Arc::new(overrides);
        (CatalogStore::new(Arc::new(source), overrides.clone()), overrides)
    }

    fn yoga() -> NewListing {
        NewListing { name: "Yoga".into(), description: "d".into(), price: 75.0, ..Default::default() }
    }

    #[tokio::test]
    async fn add_to_empty_store_assigns_sequential_ids() -> Result<(), ServiceError> {
        let (store, _) = store_with(FakeSource::default(), MemoryOverrideStore::default());
        let first = store.add_listing(yoga()).await?;
        assert_eq!(first.value.id, 1);
        assert!(first.value.active);
        assert!(first.is_durable());
        let second = store.add_listing(yoga()).await?;
        assert_eq!(second.value.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn ids_keep_increasing_across_soft_deletes() -> Result<(), ServiceError> {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(7, "Apothecary")]);
        let (store, _) = store_with(source, MemoryOverrideStore::default());
        let mut last = 0;
        for round in 0..4 {
            let added = store.add_listing(yoga()).await?.into_value();
            assert!(added.id > last);
            last = added.id;
            if round % 2 == 0 {
                assert!(store.delete_listing(added.id).await.value);
            }
        }
        assert_eq!(last, 11);
        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_hides_but_retains_record() {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(2, "Nutrition"), listing(3, "Massage")]);
        let (store, overrides) = store_with(source, MemoryOverrideStore::default());
        assert_eq!(store.get_all_listings().await.len(), 3);

        let deleted = store.delete_listing(3).await;
        assert!(deleted.value);
        assert!(store.get_listing_by_id(3).await.is_none());
        assert_eq!(store.get_all_listings().await.len(), 2);

        let export = store.export().await;
        let kept = export.services.iter().find(|l| l.id == 3).expect("still stored");
        assert!(!kept.active);
        let saved = overrides.snapshot().expect("persisted");
        assert_eq!(saved.len(), 3);
    }

    #[tokio::test]
    async fn unknown_ids_signal_not_found() {
        let (store, overrides) = store_with(FakeSource::default(), MemoryOverrideStore::default());
        assert!(store.update_listing(42, ListingPatch::default()).await.is_none());
        assert!(!store.delete_listing(42).await.value);
        assert!(overrides.snapshot().is_none());
    }

    #[tokio::test]
    async fn update_merges_fields_and_can_restore() {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki")]);
        let (store, overrides) = store_with(source, MemoryOverrideStore::default());
        store.delete_listing(1).await;
        let patch = ListingPatch { price: Some(90.0), active: Some(true), ..Default::default() };
        let updated = store.update_listing(1, patch).await.expect("found").into_value();
        assert_eq!(updated.name, "Reiki");
        assert_eq!(updated.price, 90.0);
        assert_eq!(store.get_listing_by_id(1).await, Some(updated.clone()));
        assert_eq!(overrides.snapshot().unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn category_and_provider_filters_are_case_sensitive() {
        let mut a = listing(1, "Reiki Healing");
        a.category = Some("Energy Healing".into());
        a.provider = Some("Sarah Chen".into());
        let mut b = listing(2, "Massage Therapy");
        b.category = Some("Bodywork".into());
        let (store, _) = store_with(FakeSource::with_listings(vec![a, b]), MemoryOverrideStore::default());

        assert_eq!(store.get_listings_by_category("Energy Healing").await.len(), 1);
        assert!(store.get_listings_by_category("energy healing").await.is_empty());
        assert_eq!(store.get_listings_by_provider("Sarah Chen").await.len(), 1);
        assert!(store.get_listings_by_provider("sarah chen").await.is_empty());
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let mut a = listing(1, "Reiki Healing");
        a.category = Some("Energy".into());
        let b = listing(2, "Massage Therapy");
        let (store, _) = store_with(FakeSource::with_listings(vec![a, b]), MemoryOverrideStore::default());
        let upper = store.search_listings("REIKI").await;
        let lower = store.search_listings("reiki").await;
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(store.search_listings("energy").await.len(), 1);
        store.delete_listing(1).await;
        assert!(store.search_listings("reiki").await.is_empty());
    }

    #[tokio::test]
    async fn category_fetch_failure_is_localized() {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(2, "Yoga")]).failing_categories();
        let (store, _) = store_with(source, MemoryOverrideStore::default());
        store.initialize().await;
        assert_eq!(store.state(), StorePhase::Ready);
        assert!(store.get_all_categories().await.is_empty());
        assert_eq!(store.get_all_listings().await.len(), 2);
        assert_eq!(store.get_all_providers().await.len(), 1);
    }

    #[tokio::test]
    async fn override_wins_over_source_on_same_id() {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(2, "Nutrition")]);
        let mut changed = listing(2, "Nutrition Deluxe");
        changed.price = 200.0;
        let extra = listing(9, "Sound Bath");
        let (store, _) = store_with(source, MemoryOverrideStore::with_listings(vec![changed.clone(), extra]));
        assert_eq!(store.get_listing_by_id(2).await, Some(changed));
        let ids: Vec<u64> = store.get_all_listings().await.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 9]);
    }

    #[tokio::test]
    async fn concurrent_initialize_fetches_once() {
        let source = Arc::new(FakeSource::with_listings(vec![listing(1, "Reiki")]).with_delay_ms(20));
        let store = Arc::new(CatalogStore::new(source.clone(), Arc::new(MemoryOverrideStore::default())));
        assert_eq!(store.state(), StorePhase::Uninitialized);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let s = store.clone();
            handles.push(tokio::spawn(async move { s.get_all_listings().await.len() }));
        }
        for h in handles {
            assert_eq!(h.await.unwrap(), 1);
        }
        store.initialize().await;
        assert_eq!(source.listing_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.state(), StorePhase::Ready);
    }

    #[tokio::test]
    async fn failed_override_write_keeps_change_and_warns() -> Result<(), ServiceError> {
        let store = CatalogStore::new(Arc::new(FakeSource::default()), Arc::new(FailingOverrideStore::on_save()));
        let added = store.add_listing(yoga()).await?;
        assert!(!added.is_durable());
        assert!(added.warning().unwrap().contains("storage error"));
        assert_eq!(store.get_all_listings().await.len(), 1);

        let deleted = store.delete_listing(added.value.id).await;
        assert!(deleted.value);
        assert!(deleted.persist_error.is_some());
        assert!(store.get_all_listings().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_override_layer_falls_back_to_source() {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(2, "Nutrition")]);
        let store = CatalogStore::new(Arc::new(source), Arc::new(FailingOverrideStore::on_load()));
        store.initialize().await;
        assert_eq!(store.state(), StorePhase::Ready);
        let names: Vec<String> = store.get_all_listings().await.into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Reiki".to_string(), "Nutrition".to_string()]);
    }

    #[tokio::test]
    async fn external_writer_ids_start_at_the_store_floor() -> Result<(), ServiceError> {
        let source = FakeSource::with_listings(vec![listing(1, "Reiki"), listing(2, "Nutrition")]);
        let (store, overrides) = store_with(source, MemoryOverrideStore::default());
        let dashboard = store.add_listing(yoga()).await?.into_value();
        assert_eq!(dashboard.id, 3);

        // the file behind the writer only knows ids 1 and 2
        let via_file = store
            .add_listing_via(|floor| async move { Ok(listing(floor.max(3), "Sound Bath")) })
            .await?
            .into_value();
        assert_eq!(via_file.id, 4);
        assert_eq!(store.get_listing_by_id(4).await.map(|l| l.name), Some("Sound Bath".to_string()));
        let saved: Vec<u64> = overrides.snapshot().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(saved, vec![1, 2, 3, 4]);

        assert_eq!(store.add_listing(yoga()).await?.value.id, 5);
        Ok(())
    }

    #[tokio::test]
    async fn external_writer_failure_leaves_store_untouched() {
        let (store, overrides) = store_with(FakeSource::default(), MemoryOverrideStore::default());
        let result = store
            .add_listing_via(|_| async { Err(ServiceError::Storage("read-only".into())) })
            .await;
        assert!(matches!(result, Err(ServiceError::Storage(_))));
        assert!(store.get_all_listings().await.is_empty());
        assert!(overrides.snapshot().is_none());

        let below = store.add_listing_via(|_| async { Ok(listing(0, "Stale")) }).await;
        assert!(matches!(below, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn provider_lookups() {
        let (store, _) = store_with(FakeSource::default(), MemoryOverrideStore::default());
        let p = store.get_provider_by_email("sarah@example.com").await.expect("provider");
        assert_eq!(store.get_provider_by_id(p.id).await, Some(p));
        assert!(store.get_provider_by_email("SARAH@example.com").await.is_none());
        assert_eq!(store.get_category_by_id(1).await.map(|c| c.name), Some("Energy Healing".to_string()));
    }
}
