//! In-memory key-value store, used by tests and as a stand-in when the
//! browser denies access to localStorage.

use std::cell::RefCell;
use std::collections::HashMap;

use super::traits::KeyValueStore;
use crate::domain::VaultResult;

#[derive(Debug, Default)]
pub struct MemoryKv {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKv {
    fn get_item(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> VaultResult<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.slots.borrow_mut().remove(key);
    }
}
