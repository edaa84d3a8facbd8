//! Domain Layer
//!
//! The Item entity and the error types shared by every other layer.

mod entity;
mod item;

pub use entity::{find_by_id, Entity, ValidationError, VaultError, VaultResult};
pub use item::{FileData, Item, ItemFields, ItemId, ItemType};
