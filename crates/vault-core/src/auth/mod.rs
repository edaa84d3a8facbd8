//! Auth Layer
//!
//! Interchangeable login strategies behind one trait, with the resulting
//! session mirrored into local storage whichever strategy is active.

mod error;
mod local;
mod session;

use std::rc::Rc;

use async_trait::async_trait;
use log::{info, warn};

use crate::storage::KeyValueStore;

pub use error::AuthError;
pub use local::LocalCredentialAuth;
pub use session::{AdminRecord, LocalCredential, Session, SessionStore};

/// Credential verification strategy
#[async_trait(?Send)]
pub trait AuthStrategy {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// Login/logout plus the mirrored session
pub struct AuthService<K> {
    strategy: Rc<dyn AuthStrategy>,
    sessions: SessionStore<K>,
}

impl<K: KeyValueStore> AuthService<K> {
    pub fn new(strategy: Rc<dyn AuthStrategy>, sessions: SessionStore<K>) -> Self {
        Self { strategy, sessions }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.strategy.login(email, password).await?;
        if let Err(e) = self.sessions.save_session(&session) {
            warn!("[AUTH] Could not mirror session: {}", e);
        }
        info!("[AUTH] Signed in as {}", session.email);
        Ok(session)
    }

    /// The local session is cleared even if the strategy fails to sign out
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.strategy.logout().await;
        self.sessions.clear_session();
        info!("[AUTH] Signed out");
        result
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.current().is_some()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    /// Apply an auth-state report from the cloud. A signed-out report keeps
    /// whatever session was mirrored locally.
    pub fn observe(&self, reported: Option<Session>) -> Option<Session> {
        match reported {
            Some(session) => {
                if let Err(e) = self.sessions.save_session(&session) {
                    warn!("[AUTH] Could not mirror session: {}", e);
                }
                Some(session)
            }
            None => self.sessions.current(),
        }
    }
}
