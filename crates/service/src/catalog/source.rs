use async_trait::async_trait;
use models::{Category, Provider, ServiceListing};

use crate::errors::ServiceError;

/// Resource names shared by every source: `<name>.json`.
pub const SERVICES: &str = "services";
pub const CATEGORIES: &str = "categories";
pub const PROVIDERS: &str = "providers";

/// Read side of the remote catalog. Each call returns the full collection;
/// there is no paging or server-side filtering.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_listings(&self) -> Result<Vec<ServiceListing>, ServiceError>;
    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn fetch_providers(&self) -> Result<Vec<Provider>, ServiceError>;
}
