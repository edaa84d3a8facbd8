//! Cloud Auth
//!
//! Firebase email/password sign-in as an auth strategy.

use async_trait::async_trait;
use log::warn;
use wasm_bindgen::prelude::*;

use vault_core::{AuthError, AuthStrategy, Session};

use super::{on_auth_changed, sign_in, sign_out, BridgeError};

#[derive(Debug, Clone, Copy, Default)]
pub struct CloudAuth;

fn auth_error(value: JsValue) -> AuthError {
    let err = BridgeError::from_js(value);
    warn!("[AUTH] Firebase rejected request: {}", err);
    AuthError::from_code(&err.code)
}

#[async_trait(?Send)]
impl AuthStrategy for CloudAuth {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = sign_in(email.trim(), password).await.map_err(auth_error)?;
        serde_wasm_bindgen::from_value::<Session>(user).map_err(|e| AuthError::Other(e.to_string()))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        sign_out().await.map_err(auth_error)?;
        Ok(())
    }
}

/// Forward Firebase auth-state reports for the lifetime of the page
pub fn watch_auth_state(callback: impl Fn(Option<Session>) + 'static) {
    let observer = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        if value.is_null() || value.is_undefined() {
            callback(None);
            return;
        }
        match serde_wasm_bindgen::from_value::<Session>(value) {
            Ok(session) => callback(Some(session)),
            Err(e) => warn!("[AUTH] Unreadable auth state: {}", e),
        }
    });
    on_auth_changed(&observer);
    observer.forget();
}
