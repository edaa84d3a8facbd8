//! Local Backend
//!
//! Items persisted as one JSON array in a key-value slot. Ids and timestamps
//! come from the client clock.

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;

use super::mirror::SnapshotMirror;
use super::snapshot::sort_newest_first;
use super::traits::{BackendKind, KeyValueStore, Snapshot, SnapshotListener, SnapshotOrigin, StorageBackend};
use crate::domain::{Item, ItemFields, ItemId, VaultError, VaultResult};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct LocalBackend<K> {
    mirror: SnapshotMirror<K>,
    listeners: RefCell<Vec<SnapshotListener>>,
    clock: Clock,
}

impl<K: KeyValueStore> LocalBackend<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self::with_clock(kv, key, Box::new(Utc::now))
    }

    pub fn with_clock(kv: K, key: impl Into<String>, clock: Clock) -> Self {
        Self {
            mirror: SnapshotMirror::new(kv, key),
            listeners: RefCell::new(Vec::new()),
            clock,
        }
    }

    /// Current contents of the slot, newest first
    pub fn items(&self) -> Vec<Item> {
        self.mirror.load()
    }

    fn next_id(&self, items: &[Item], now: DateTime<Utc>) -> ItemId {
        let base = format!("local_{}", now.timestamp_millis());
        if !items.iter().any(|i| i.id == base) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", base, n);
            if !items.iter().any(|i| i.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn commit(&self, mut items: Vec<Item>) -> VaultResult<()> {
        sort_newest_first(&mut items);
        self.mirror.store(&items)?;
        self.emit(items);
        Ok(())
    }

    fn emit(&self, items: Vec<Item>) {
        // Listeners may re-enter the backend, so call them on a copy
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(Snapshot { items: items.clone(), origin: SnapshotOrigin::Local });
        }
    }
}

#[async_trait(?Send)]
impl<K: KeyValueStore> StorageBackend for LocalBackend<K> {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn subscribe(&self, listener: SnapshotListener) {
        self.listeners.borrow_mut().push(listener.clone());
        let items = self.mirror.load();
        info!("[STORE] Loaded {} items from local storage", items.len());
        listener(Snapshot { items, origin: SnapshotOrigin::Local });
    }

    async fn add(&self, fields: ItemFields) -> VaultResult<ItemId> {
        let now = (self.clock)();
        let mut items = self.mirror.load();
        let id = self.next_id(&items, now);
        items.insert(0, Item::from_fields(id.clone(), fields, now));
        self.commit(items)?;
        info!("[STORE] Added local item {}", id);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: ItemFields) -> VaultResult<()> {
        let now = (self.clock)();
        let mut items = self.mirror.load();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| VaultError::NotFound(format!("item {}", id)))?;
        item.apply_fields(fields, now);
        self.commit(items)
    }

    async fn delete(&self, id: &str) -> VaultResult<()> {
        let mut items = self.mirror.load();
        items.retain(|i| i.id != id);
        self.commit(items)?;
        info!("[STORE] Deleted local item {}", id);
        Ok(())
    }

    async fn delete_blob(&self, _path: &str) -> VaultResult<()> {
        // Local uploads are inlined as data URLs; nothing to remove
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemType;
    use crate::storage::MemoryKv;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixed_clock() -> Clock {
        let t = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap().with_timezone(&Utc);
        Box::new(move || t)
    }

    fn link(title: &str) -> ItemFields {
        ItemFields {
            item_type: ItemType::Links,
            title: title.into(),
            url: "https://example.com".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ids_stay_unique_within_one_millisecond() {
        let backend = LocalBackend::with_clock(MemoryKv::new(), "items", fixed_clock());
        let a = backend.add(link("a")).await.unwrap();
        let b = backend.add(link("b")).await.unwrap();
        let c = backend.add(link("c")).await.unwrap();
        assert_eq!(a, "local_1714564800000");
        assert_eq!(b, "local_1714564800000_1");
        assert_eq!(c, "local_1714564800000_2");
    }

    #[tokio::test]
    async fn test_subscribe_reads_once_then_follows_mutations() {
        let backend = LocalBackend::new(MemoryKv::new(), "items");
        let calls = Rc::new(Cell::new(0));
        let last_len = Rc::new(Cell::new(usize::MAX));
        {
            let calls = calls.clone();
            let last_len = last_len.clone();
            backend.subscribe(Rc::new(move |snap: Snapshot| {
                assert_eq!(snap.origin, SnapshotOrigin::Local);
                calls.set(calls.get() + 1);
                last_len.set(snap.items.len());
            }));
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(last_len.get(), 0);

        let id = backend.add(link("Example")).await.unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(last_len.get(), 1);

        backend.delete(&id).await.unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(last_len.get(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let backend = LocalBackend::new(MemoryKv::new(), "items");
        let err = backend.update("nope", link("x")).await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }
}
