//! Catalog store: a lazily initialized cache of listings, categories and
//! providers, reconciled against a local override layer.

pub mod source;
pub mod overrides;
pub mod reconcile;
pub mod store;

pub use overrides::{MemoryOverrideStore, OverrideStore};
pub use reconcile::reconcile;
pub use source::CatalogSource;
pub use store::{CatalogStore, Persisted, StorePhase};
