//! Serialized item collection in a key-value slot
//!
//! The local backend uses it as its primary store; the cloud backend writes
//! every live snapshot into it so there is a last-known copy to fall back on.

use log::{error, warn};
use serde_json::Value;

use super::snapshot::{decode_snapshot, sort_newest_first};
use super::traits::KeyValueStore;
use crate::domain::{Item, VaultResult};

pub struct SnapshotMirror<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SnapshotMirror<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot. A missing slot is an empty vault; a corrupt one is
    /// logged and treated as empty.
    pub fn load(&self) -> Vec<Item> {
        let Some(raw) = self.kv.get_item(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => {
                let mut items = decode_snapshot(records);
                sort_newest_first(&mut items);
                items
            }
            Err(e) => {
                error!("[STORE] Local slot {} is not a JSON array: {}", self.key, e);
                Vec::new()
            }
        }
    }

    pub fn store(&self, items: &[Item]) -> VaultResult<()> {
        let raw = serde_json::to_string(items)?;
        self.kv.set_item(&self.key, &raw)
    }

    /// Best-effort write used for the cloud mirror
    pub fn record(&self, items: &[Item]) {
        if let Err(e) = self.store(items) {
            warn!("[STORE] Could not mirror snapshot locally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemFields, ItemType};
    use crate::storage::MemoryKv;
    use chrono::Utc;

    #[test]
    fn test_record_then_load() {
        let mirror = SnapshotMirror::new(MemoryKv::new(), "contentVaultItems");
        assert!(mirror.load().is_empty());

        let item = Item::from_fields(
            "abc".into(),
            ItemFields { item_type: ItemType::Links, title: "Example".into(), url: "https://example.com".into(), ..Default::default() },
            Utc::now(),
        );
        mirror.record(&[item.clone()]);
        assert_eq!(mirror.load(), vec![item]);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let kv = MemoryKv::new();
        kv.set_item("contentVaultItems", "{not json").unwrap();
        let mirror = SnapshotMirror::new(kv, "contentVaultItems");
        assert!(mirror.load().is_empty());
    }
}
