use std::time::Duration;

use async_trait::async_trait;
use models::{Category, Provider, ServiceListing};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::source::{CatalogSource, CATEGORIES, PROVIDERS, SERVICES};
use crate::errors::ServiceError;

/// Catalog source fetching `{base_url}/data/<name>.json` over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Source(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn resource_url(&self, name: &str) -> String {
        format!("{}/data/{name}.json", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, ServiceError> {
        let url = self.resource_url(name);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Source(format!("GET {url}: {e}")))?
            .error_for_status()
            .map_err(|e| ServiceError::Source(format!("GET {url}: {e}")))?;
        let items = resp
            .json::<Vec<T>>()
            .await
            .map_err(|e| ServiceError::Source(format!("decode {url}: {e}")))?;
        debug!(%url, count = items.len(), "fetched catalog resource");
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch_listings(&self) -> Result<Vec<ServiceListing>, ServiceError> {
        self.fetch(SERVICES).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.fetch(CATEGORIES).await
    }

    async fn fetch_providers(&self) -> Result<Vec<Provider>, ServiceError> {
        self.fetch(PROVIDERS).await
    }
}
