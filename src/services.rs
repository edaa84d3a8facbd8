//! Service Wiring
//!
//! Storage, auth and upload strategies are picked together, once, before
//! the UI mounts: all cloud when Firebase is configured and starts, all
//! local otherwise.

use std::rc::Rc;

use log::{info, warn};

use vault_core::{
    AuthService, AuthStrategy, BackendKind, LocalBackend, LocalCredentialAuth, Session, SessionStore, StorageBackend,
    Vault, VaultConfig,
};

use crate::bridge::{self, BrowserStorage, CloudAuth, CloudBackend, CloudUploader, DataUrlUploader, Uploader};

pub type VaultAuth = AuthService<BrowserStorage>;

#[derive(Clone)]
pub struct Services {
    pub config: VaultConfig,
    pub vault: Vault,
    pub auth: Rc<VaultAuth>,
    pub uploader: Rc<dyn Uploader>,
}

impl Services {
    pub async fn select(config: VaultConfig) -> Self {
        match config.cloud().cloned() {
            Some(firebase) => match bridge::init_cloud(&firebase).await {
                Ok(()) => return Self::cloud(config),
                Err(e) => warn!("[APP] Firebase failed to start, falling back to local storage: {}", e),
            },
            None => warn!("[APP] Firebase not configured, using local storage"),
        }
        Self::local(config)
    }

    fn cloud(config: VaultConfig) -> Self {
        info!("[APP] Using cloud storage");
        let backend: Rc<dyn StorageBackend> = Rc::new(CloudBackend::new(&config.items_key));
        let strategy: Rc<dyn AuthStrategy> = Rc::new(CloudAuth);
        Self {
            vault: Vault::new(backend),
            auth: Rc::new(AuthService::new(strategy, SessionStore::new(BrowserStorage, config.admin_key.clone()))),
            uploader: Rc::new(CloudUploader),
            config,
        }
    }

    fn local(config: VaultConfig) -> Self {
        let backend: Rc<dyn StorageBackend> = Rc::new(LocalBackend::new(BrowserStorage, config.items_key.clone()));
        let strategy: Rc<dyn AuthStrategy> =
            Rc::new(LocalCredentialAuth::new(SessionStore::new(BrowserStorage, config.admin_key.clone())));
        Self {
            vault: Vault::new(backend),
            auth: Rc::new(AuthService::new(strategy, SessionStore::new(BrowserStorage, config.admin_key.clone()))),
            uploader: Rc::new(DataUrlUploader::new(config.local_upload_limit_bytes)),
            config,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.vault.kind()
    }

    /// Report the session now and, in cloud mode, on every auth-state change
    pub fn watch_session(&self, on_change: impl Fn(Option<Session>) + 'static) {
        on_change(self.auth.current_session());
        if self.kind() == BackendKind::Cloud {
            let auth = self.auth.clone();
            bridge::watch_auth_state(move |reported| on_change(auth.observe(reported)));
        }
    }
}
