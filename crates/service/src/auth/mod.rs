//! Auth module: demo provider login plus a session registry.
//!
//! The catalog store never checks authorization; the HTTP layer uses this
//! module to gate dashboard writes.

pub mod domain;
pub mod errors;
pub mod service;
pub mod sessions;

pub use service::DemoAuth;
pub use sessions::SessionStore;
