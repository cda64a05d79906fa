use axum::{extract::{Path, Query, State}, Json};
use models::{Category, Provider, ServiceListing};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// At most one filter applies: `q`, then `category`, then `provider`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub provider: Option<String>,
}

/// List active listings, optionally filtered.
pub async fn list_listings(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Vec<ServiceListing>> {
    let catalog = &state.catalog;
    let items = if let Some(query) = q.q.as_deref() {
        catalog.search_listings(query).await
    } else if let Some(category) = q.category.as_deref() {
        catalog.get_listings_by_category(category).await
    } else if let Some(provider) = q.provider.as_deref() {
        catalog.get_listings_by_provider(provider).await
    } else {
        catalog.get_all_listings().await
    };
    Json(items)
}

pub async fn get_listing(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<ServiceListing>, JsonApiError> {
    state.catalog.get_listing_by_id(id).await.map(Json).ok_or_else(|| JsonApiError::not_found("service"))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.get_all_categories().await)
}

pub async fn get_category(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Category>, JsonApiError> {
    state.catalog.get_category_by_id(id).await.map(Json).ok_or_else(|| JsonApiError::not_found("category"))
}

pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<Provider>> {
    Json(state.catalog.get_all_providers().await)
}

pub async fn get_provider(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Provider>, JsonApiError> {
    state.catalog.get_provider_by_id(id).await.map(Json).ok_or_else(|| JsonApiError::not_found("provider"))
}

pub async fn get_provider_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Provider>, JsonApiError> {
    state.catalog.get_provider_by_email(&email).await.map(Json).ok_or_else(|| JsonApiError::not_found("provider"))
}
