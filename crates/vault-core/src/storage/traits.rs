//! Storage Layer - Core Traits

use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::{Item, ItemFields, ItemId, VaultResult};

/// Which backing store is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cloud,
    Local,
}

impl BackendKind {
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Cloud => "cloud",
            BackendKind::Local => "local",
        }
    }
}

/// Where a snapshot came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Pushed by the cloud subscription
    Live,
    /// Read from local persisted storage
    Local,
    /// Last-known local copy served because the cloud subscription failed
    Fallback { reason: String },
}

/// Full, newest-first list of items as delivered to the item store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub items: Vec<Item>,
    pub origin: SnapshotOrigin,
}

impl Snapshot {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SnapshotOrigin::Fallback { .. })
    }
}

pub type SnapshotListener = Rc<dyn Fn(Snapshot)>;

/// Synchronous string slots, i.e. the browser's localStorage
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> VaultResult<()>;

    fn remove_item(&self, key: &str);
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Rc<K> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> VaultResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

/// Uniform operations over a backing store
///
/// Whichever backend is active, every listener receives a full ordered
/// snapshot after each mutation.
#[async_trait(?Send)]
pub trait StorageBackend {
    fn kind(&self) -> BackendKind;

    /// Register for snapshots. The cloud backend keeps pushing for the
    /// lifetime of the page; the local backend reads once immediately and
    /// again after each of its own mutations.
    fn subscribe(&self, listener: SnapshotListener);

    /// Insert a new item, returning the assigned id
    async fn add(&self, fields: ItemFields) -> VaultResult<ItemId>;

    /// Overwrite the editable fields of an existing item
    async fn update(&self, id: &str, fields: ItemFields) -> VaultResult<()>;

    async fn delete(&self, id: &str) -> VaultResult<()>;

    /// Remove an uploaded blob by storage path
    async fn delete_blob(&self, path: &str) -> VaultResult<()>;
}
