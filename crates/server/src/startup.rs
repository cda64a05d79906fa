use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use axum::Router;
use configs::{AppConfig, SourceKind};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{
    auth::{DemoAuth, SessionStore},
    catalog::{CatalogSource, CatalogStore},
    file::{FileSource, ListingFileWriter, SlotOverrideStore},
    remote::HttpSource,
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn build_source(cfg: &configs::CatalogConfig) -> Result<Arc<dyn CatalogSource>, StartupError> {
    match cfg.source {
        SourceKind::File => Ok(Arc::new(FileSource::new(&cfg.data_dir))),
        SourceKind::Http => {
            if cfg.remote_base_url.is_empty() {
                return Err(StartupError::InvalidConfig("catalog.remote_base_url is empty".into()));
            }
            let source = HttpSource::new(&cfg.remote_base_url, Duration::from_secs(cfg.request_timeout_secs))?;
            Ok(Arc::new(source))
        }
    }
}

/// Wire the catalog store, file writer and auth from configuration.
/// The store is created here and not initialized; `run` warms it before serving.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let source = build_source(&cfg.catalog)?;
    let overrides = SlotOverrideStore::open(&cfg.catalog.override_path, cfg.catalog.override_slot.clone()).await?;
    let catalog = Arc::new(CatalogStore::new(source, overrides));
    let writer = ListingFileWriter::new(Path::new(&cfg.catalog.data_dir).join("services.json"));

    Ok(AppState {
        catalog,
        writer,
        auth: DemoAuth::new(cfg.auth.username.clone(), cfg.auth.password.clone()),
        sessions: SessionStore::new(Duration::from_secs(cfg.auth.session_idle_secs)),
    })
}

/// Build the router for a prepared state.
pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    routes::build_router(state, &cfg.catalog.data_dir, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;

    let override_dir = Path::new(&cfg.catalog.override_path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&cfg.catalog.data_dir, &override_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let state = build_state(&cfg).await?;
    state.catalog.initialize().await;

    let app = build_app(state, &cfg);
    let addr = bind_addr(&cfg)?;
    info!(%addr, source = ?cfg.catalog.source, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
