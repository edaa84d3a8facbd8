//! Cloud Backend
//!
//! Firestore `items` collection behind the storage trait. Every live
//! snapshot is mirrored into the local items slot, which is what a failed
//! subscription falls back to.

use std::rc::Rc;

use async_trait::async_trait;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;

use vault_core::storage::{decode_snapshot, sort_newest_first};
use vault_core::{
    BackendKind, ItemFields, ItemId, Snapshot, SnapshotListener, SnapshotMirror, SnapshotOrigin, StorageBackend,
    VaultError, VaultResult,
};

use super::local::BrowserStorage;
use super::{add_item, delete_blob, delete_item, storage_error, subscribe_items, to_js, update_item, BridgeError};

pub struct CloudBackend {
    mirror: Rc<SnapshotMirror<BrowserStorage>>,
}

impl CloudBackend {
    pub fn new(items_key: &str) -> Self {
        Self {
            mirror: Rc::new(SnapshotMirror::new(BrowserStorage, items_key)),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for CloudBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cloud
    }

    fn subscribe(&self, listener: SnapshotListener) {
        let mirror = self.mirror.clone();
        let on_live = listener.clone();
        let on_snapshot = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<serde_json::Value>>(value) {
                Ok(records) => {
                    let mut items = decode_snapshot(records);
                    sort_newest_first(&mut items);
                    mirror.record(&items);
                    info!("[CLOUD] Snapshot with {} items", items.len());
                    on_live(Snapshot { items, origin: SnapshotOrigin::Live });
                }
                Err(e) => error!("[CLOUD] Unreadable snapshot: {}", e),
            }
        });

        let mirror = self.mirror.clone();
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let err = BridgeError::from_js(value);
            warn!("[CLOUD] Subscription failed, serving local copy: {}", err);
            listener(Snapshot {
                items: mirror.load(),
                origin: SnapshotOrigin::Fallback { reason: err.message },
            });
        });

        subscribe_items(&on_snapshot, &on_error);
        // The subscription lives as long as the page
        on_snapshot.forget();
        on_error.forget();
    }

    async fn add(&self, fields: ItemFields) -> VaultResult<ItemId> {
        let id = add_item(to_js(&fields)?).await.map_err(storage_error)?;
        id.as_string()
            .ok_or_else(|| VaultError::Storage("cloud returned no document id".to_string()))
    }

    async fn update(&self, id: &str, fields: ItemFields) -> VaultResult<()> {
        update_item(id, to_js(&fields)?).await.map_err(storage_error)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> VaultResult<()> {
        delete_item(id).await.map_err(storage_error)?;
        Ok(())
    }

    async fn delete_blob(&self, path: &str) -> VaultResult<()> {
        delete_blob(path).await.map_err(storage_error)?;
        info!("[CLOUD] Removed blob {}", path);
        Ok(())
    }
}
