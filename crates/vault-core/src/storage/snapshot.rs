//! Snapshot decoding and ordering

use log::warn;
use serde_json::Value;

use crate::domain::Item;

/// Decode raw records one by one, skipping those that do not parse
pub fn decode_snapshot(records: Vec<Value>) -> Vec<Item> {
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        let id = record.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
        match serde_json::from_value::<Item>(record) {
            Ok(item) => items.push(item),
            Err(e) => warn!("[STORE] Skipping unreadable item {}: {}", id, e),
        }
    }
    items
}

/// Newest first by `createdAt`. Items still waiting for a server timestamp
/// were just written, so they go to the top.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(x),
    });
}
