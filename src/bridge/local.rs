//! Browser localStorage as a key-value store

use gloo_storage::{LocalStorage, Storage};

use vault_core::{KeyValueStore, VaultError, VaultResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> VaultResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| VaultError::Storage(format!("localStorage write failed: {:?}", e)))
    }

    fn remove_item(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
