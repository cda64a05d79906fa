pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod submit;

use std::path::Path;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::{metrics, types::Health};

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: public catalog reads, the raw data
/// files, the form write endpoint, auth, and the session-gated dashboard.
pub fn build_router(state: AppState, data_dir: impl AsRef<Path>, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .nest_service("/data", ServeDir::new(data_dir.as_ref()))
        .route("/api/listings", get(catalog::list_listings))
        .route("/api/listings/:id", get(catalog::get_listing))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/categories/:id", get(catalog::get_category))
        .route("/api/providers", get(catalog::list_providers))
        .route("/api/providers/:id", get(catalog::get_provider))
        .route("/api/providers/by-email/:email", get(catalog::get_provider_by_email))
        // POST only; other methods get 405 from the method router
        .route("/api/services", post(submit::submit_listing))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Session-gated routes
    let gated = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/dashboard/services",
            get(dashboard::list_services).post(dashboard::create_service),
        )
        .route(
            "/dashboard/services/:id",
            patch(dashboard::update_service).delete(dashboard::delete_service),
        )
        .route("/dashboard/export", get(dashboard::export))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    public
        .merge(gated)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
