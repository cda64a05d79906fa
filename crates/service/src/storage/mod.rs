//! Storage abstractions for service layer
//!
//! Reusable file-backed stores shared by the override layer and anything
//! else that persists a small JSON document.

pub mod json_slot_store;
