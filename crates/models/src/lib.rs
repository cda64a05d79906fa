//! Catalog domain types shared by the service and server crates.
//!
//! Field names follow the camelCase JSON written to `services.json`,
//! `categories.json` and `providers.json`.

pub mod errors;
pub mod listing;
pub mod category;
pub mod provider;
pub mod export;

pub use category::Category;
pub use export::CatalogExport;
pub use listing::{ListingPatch, NewListing, ServiceListing};
pub use provider::Provider;
