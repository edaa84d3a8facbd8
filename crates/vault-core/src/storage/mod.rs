//! Storage Layer
//!
//! One capability interface over the interchangeable backing stores.
//! The cloud implementation lives in the UI crate next to its JS bindings;
//! the local one is here so it can be tested against an in-memory store.

mod local;
mod memory;
mod mirror;
mod snapshot;
mod traits;

pub use local::LocalBackend;
pub use memory::MemoryKv;
pub use mirror::SnapshotMirror;
pub use snapshot::{decode_snapshot, sort_newest_first};
pub use traits::{BackendKind, KeyValueStore, Snapshot, SnapshotListener, SnapshotOrigin, StorageBackend};
