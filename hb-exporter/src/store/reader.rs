//! Order store reader
//!
//! Scans every `v2|` key, decodes the record and keeps orders that carry at
//! least one key entry. A record that fails to decode is skipped and
//! reported; it never aborts the rest of the load.

use super::{KeyValueStore, codec};
use serde::Serialize;
use shared::Order;

/// Prefix of the vendor's cached order records
pub const ORDER_KEY_PREFIX: &str = "v2|";

/// A record that could not be decoded
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

/// Result of one scan over the store
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub orders: Vec<Order>,
    /// Decode failures
    pub skipped: Vec<SkippedRecord>,
    /// Well-formed orders dropped for having no keys
    pub without_keys: usize,
}

/// Read all orders from the store
pub fn load_orders<S: KeyValueStore + ?Sized>(store: &S) -> LoadReport {
    let mut report = LoadReport::default();

    for key in store.keys().into_iter().filter(|k| k.starts_with(ORDER_KEY_PREFIX)) {
        let Some(payload) = store.get(&key) else {
            continue;
        };

        match codec::decompress_json::<Option<Order>>(&payload) {
            Ok(Some(order)) if order.has_keys() => report.orders.push(order),
            Ok(_) => report.without_keys += 1,
            Err(reason) => {
                tracing::warn!(%key, %reason, "Skipping unreadable order record");
                report.skipped.push(SkippedRecord { key, reason });
            }
        }
    }

    tracing::debug!(
        orders = report.orders.len(),
        skipped = report.skipped.len(),
        without_keys = report.without_keys,
        "Loaded orders"
    );
    report
}
