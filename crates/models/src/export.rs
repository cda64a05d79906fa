use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, Provider, ServiceListing};

/// Full catalog snapshot for backup or migration. Includes soft-deleted listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExport {
    pub services: Vec<ServiceListing>,
    pub categories: Vec<Category>,
    pub providers: Vec<Provider>,
    pub export_date: DateTime<Utc>,
}
