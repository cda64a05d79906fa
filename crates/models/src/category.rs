use serde::{Deserialize, Serialize};

/// Catalog category. Listings reference categories by free-form name, not by id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display hint, e.g. `#8B5CF6`.
    #[serde(default)]
    pub color: String,
}
