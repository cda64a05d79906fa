use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use models::{CatalogExport, ListingPatch, NewListing, ServiceListing};
use serde::{Deserialize, Serialize};
use service::auth::domain::ProviderSession;
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const PERSIST_WARNING_HEADER: &str = "x-persist-warning";

/// Write response; `warning` is set when the change could not be persisted.
#[derive(Debug, Serialize)]
pub struct WriteOutput {
    pub service: ServiceListing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderQuery {
    pub provider: Option<String>,
}

pub async fn list_services(State(state): State<AppState>, Query(q): Query<ProviderQuery>) -> Json<Vec<ServiceListing>> {
    match q.provider.as_deref() {
        Some(provider) => Json(state.catalog.get_listings_by_provider(provider).await),
        None => Json(state.catalog.get_all_listings().await),
    }
}

pub async fn create_service(
    State(state): State<AppState>,
    Extension(session): Extension<ProviderSession>,
    Json(input): Json<NewListing>,
) -> Result<(StatusCode, Json<WriteOutput>), JsonApiError> {
    let written = state.catalog.add_listing(input).await?;
    let warning = written.warning();
    info!(id = written.value.id, by = %session.username, durable = warning.is_none(), "dashboard created service");
    Ok((StatusCode::CREATED, Json(WriteOutput { service: written.into_value(), warning })))
}

pub async fn update_service(
    State(state): State<AppState>,
    Extension(session): Extension<ProviderSession>,
    Path(id): Path<u64>,
    Json(patch): Json<ListingPatch>,
) -> Result<Json<WriteOutput>, JsonApiError> {
    let written = state
        .catalog
        .update_listing(id, patch)
        .await
        .ok_or_else(|| JsonApiError::not_found("service"))?;
    let warning = written.warning();
    info!(id, by = %session.username, durable = warning.is_none(), "dashboard updated service");
    Ok(Json(WriteOutput { service: written.into_value(), warning }))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Extension(session): Extension<ProviderSession>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, HeaderMap), JsonApiError> {
    let written = state.catalog.delete_listing(id).await;
    if !written.value {
        return Err(JsonApiError::not_found("service"));
    }
    let mut headers = HeaderMap::new();
    if let Some(warning) = written.warning() {
        warn!(id, %warning, "soft delete not persisted");
        if let Ok(v) = HeaderValue::from_str(&warning) {
            headers.insert(PERSIST_WARNING_HEADER, v);
        }
    }
    info!(id, by = %session.username, "dashboard deleted service");
    Ok((StatusCode::NO_CONTENT, headers))
}

pub async fn export(State(state): State<AppState>) -> Json<CatalogExport> {
    Json(state.catalog.export().await)
}
