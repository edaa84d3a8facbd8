//! Session mirror in the admin slot

use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::VaultResult;
use crate::storage::KeyValueStore;

/// Signed-in admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Session {
    pub fn admin(uid: Option<String>, email: impl Into<String>) -> Self {
        Self { uid, email: email.into(), is_admin: true }
    }
}

/// Credential registered by the local bootstrap login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCredential {
    pub email: String,
    pub password: String,
}

/// Contents of the admin slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub credential: Option<LocalCredential>,
}

pub struct SessionStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn load(&self) -> AdminRecord {
        let Some(raw) = self.kv.get_item(&self.key) else {
            return AdminRecord::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            error!("[AUTH] Admin slot {} is unreadable: {}", self.key, e);
            AdminRecord::default()
        })
    }

    pub fn save(&self, record: &AdminRecord) -> VaultResult<()> {
        let raw = serde_json::to_string(record)?;
        self.kv.set_item(&self.key, &raw)
    }

    pub fn current(&self) -> Option<Session> {
        self.load().session.filter(|s| s.is_admin)
    }

    pub fn save_session(&self, session: &Session) -> VaultResult<()> {
        let mut record = self.load();
        record.session = Some(session.clone());
        self.save(&record)
    }

    /// Drops the session but keeps a registered credential
    pub fn clear_session(&self) {
        let mut record = self.load();
        if record.credential.is_none() {
            self.kv.remove_item(&self.key);
            return;
        }
        record.session = None;
        if let Err(e) = self.save(&record) {
            error!("[AUTH] Could not clear session: {}", e);
        }
    }
}
