//! Local credential strategy
//!
//! The first credential pair ever submitted becomes the admin credential;
//! later logins are compared against it in plaintext. Only meant for a
//! single-user vault without a configured cloud backend.

use async_trait::async_trait;
use log::warn;

use super::error::AuthError;
use super::session::{LocalCredential, Session, SessionStore};
use super::AuthStrategy;
use crate::storage::KeyValueStore;

const MIN_PASSWORD_LEN: usize = 6;

pub struct LocalCredentialAuth<K> {
    store: SessionStore<K>,
}

impl<K: KeyValueStore> LocalCredentialAuth<K> {
    pub fn new(store: SessionStore<K>) -> Self {
        Self { store }
    }

    pub fn has_credential(&self) -> bool {
        self.store.load().credential.is_some()
    }
}

#[async_trait(?Send)]
impl<K: KeyValueStore> AuthStrategy for LocalCredentialAuth<K> {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        let mut record = self.store.load();
        match &record.credential {
            Some(stored) if stored.email == email && stored.password == password => {
                Ok(Session::admin(None, email))
            }
            Some(_) => Err(AuthError::InvalidCredential),
            None => {
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(AuthError::WeakPassword);
                }
                warn!("[AUTH] No local admin yet, registering {} as admin", email);
                record.credential = Some(LocalCredential {
                    email: email.to_string(),
                    password: password.to_string(),
                });
                self.store
                    .save(&record)
                    .map_err(|e| AuthError::Other(e.to_string()))?;
                Ok(Session::admin(None, email))
            }
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
