use std::sync::Arc;

use service::{
    auth::{DemoAuth, SessionStore},
    catalog::CatalogStore,
    file::ListingFileWriter,
};

/// Shared handler state. Built once in `startup` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub writer: ListingFileWriter,
    pub auth: DemoAuth,
    pub sessions: SessionStore,
}
