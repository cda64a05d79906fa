//! Prometheus counters for the catalog, registered in the default registry.

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

pub static LISTINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_listings_created_total",
        "Total listings created through the catalog store or the file writer"
    )
    .expect("register listings_created_total")
});

pub static LISTINGS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_listings_updated_total",
        "Total listing updates applied"
    )
    .expect("register listings_updated_total")
});

pub static LISTINGS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_listings_deleted_total",
        "Total listings soft-deleted"
    )
    .expect("register listings_deleted_total")
});

/// Labelled by collection: `services`, `categories`, `providers`.
pub static SOURCE_FETCH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "catalog_source_fetch_failures_total",
        "Source fetches that failed and were replaced by an empty collection",
        &["collection"]
    )
    .expect("register source_fetch_failures_total")
});

pub static OVERRIDE_WRITE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "catalog_override_write_failures_total",
        "Override layer writes that failed after an in-memory mutation"
    )
    .expect("register override_write_failures_total")
});

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
