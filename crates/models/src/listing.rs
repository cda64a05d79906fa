use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Image used when a provider submits a listing without one.
pub const DEFAULT_IMAGE: &str = "/images/default-service.jpg";

fn default_active() -> bool {
    true
}

/// A bookable service offering.
///
/// `active == false` marks a soft-deleted record: it stays in storage and in
/// exports but is filtered out of every public query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ServiceListing {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Case-insensitive substring match on name, description and category.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .map(|c| c.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

/// Input for creating a listing; the id and `active` flag are assigned by the store.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl NewListing {
    pub fn into_listing(self, id: u64) -> ServiceListing {
        ServiceListing {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            source: self.source,
            category: self.category,
            provider: self.provider,
            duration: self.duration,
            active: true,
        }
    }
}

/// Partial update. Present fields replace the stored ones; the id never changes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl ListingPatch {
    pub fn apply_to(self, target: &mut ServiceListing) {
        if let Some(v) = self.name {
            target.name = v;
        }
        if let Some(v) = self.description {
            target.description = v;
        }
        if let Some(v) = self.price {
            target.price = v;
        }
        if let Some(v) = self.image {
            target.image = Some(v);
        }
        if let Some(v) = self.source {
            target.source = Some(v);
        }
        if let Some(v) = self.category {
            target.category = Some(v);
        }
        if let Some(v) = self.provider {
            target.provider = Some(v);
        }
        if let Some(v) = self.duration {
            target.duration = Some(v);
        }
        if let Some(v) = self.active {
            target.active = v;
        }
    }
}

/// Next free id: one past the largest id present, or 1 for an empty collection.
pub fn next_id(listings: &[ServiceListing]) -> Result<u64, ModelError> {
    listings
        .iter()
        .map(|l| l.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(ModelError::IdsExhausted)
}

/// Parse a submitted price field.
pub fn parse_price(raw: &str) -> Result<f64, ModelError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ModelError::Validation(format!("price is not a number: {raw:?}")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(price)
}
