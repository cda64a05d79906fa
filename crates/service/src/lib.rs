//! Service layer for the services marketplace.
//! - `catalog`: the session-scoped catalog store and its reconciliation rules.
//! - `file` / `remote`: concrete catalog sources and override persistence.
//! - `auth`: demo provider login and session registry gating dashboard writes.

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod storage;
pub mod catalog;
pub mod file;
pub mod remote;
#[cfg(test)]
pub mod test_support;
