//! Content Vault Core
//!
//! Layered architecture:
//! - domain: Item entity and error types
//! - storage: backing-store abstraction with local/in-memory implementations
//! - auth: session mirroring and the local credential strategy
//! - filter, card, form, upload: view logic shared by the UI
//! - vault: create/update/delete flows on top of a storage backend

pub mod auth;
pub mod card;
pub mod config;
pub mod domain;
pub mod filter;
pub mod form;
pub mod storage;
pub mod upload;
pub mod vault;

#[cfg(test)]
mod tests;

pub use auth::{AdminRecord, AuthError, AuthService, AuthStrategy, LocalCredentialAuth, Session, SessionStore};
pub use card::{CardAction, CardLayout, CardView};
pub use config::{FirebaseConfig, VaultConfig};
pub use domain::{find_by_id, Entity, FileData, Item, ItemFields, ItemId, ItemType, ValidationError, VaultError, VaultResult};
pub use filter::Tab;
pub use form::{ContentSource, FormMode, FormState, ItemDraft};
pub use storage::{
    BackendKind, KeyValueStore, LocalBackend, MemoryKv, Snapshot, SnapshotListener, SnapshotMirror,
    SnapshotOrigin, StorageBackend,
};
pub use upload::UploadedFile;
pub use vault::Vault;
