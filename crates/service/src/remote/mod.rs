//! Catalog sources reached over the network.

pub mod http_source;

pub use http_source::HttpSource;
