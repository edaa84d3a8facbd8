//! Application Context
//!
//! Services and UI-wide signals provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use vault_core::{VaultConfig, Vault};

use crate::bridge::Uploader;
use crate::models::{Overlay, Toast, ToastKind};
use crate::services::{Services, VaultAuth};

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend strategies chosen at startup (not Send, so kept local)
    services: StoredValue<Services, LocalStorage>,
    /// Visible notifications - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible notifications - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    /// Open modal, if any - read
    pub overlay: ReadSignal<Option<Overlay>>,
    /// Open modal, if any - write
    set_overlay: WriteSignal<Option<Overlay>>,
}

impl AppContext {
    pub fn new(services: Services) -> Self {
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        let (overlay, set_overlay) = signal::<Option<Overlay>>(None);
        Self {
            services: StoredValue::new_local(services),
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
            overlay,
            set_overlay,
        }
    }

    pub fn vault(&self) -> Vault {
        self.services.with_value(|s| s.vault.clone())
    }

    pub fn auth(&self) -> Rc<VaultAuth> {
        self.services.with_value(|s| s.auth.clone())
    }

    pub fn uploader(&self) -> Rc<dyn Uploader> {
        self.services.with_value(|s| s.uploader.clone())
    }

    pub fn config(&self) -> VaultConfig {
        self.services.with_value(|s| s.config.clone())
    }

    pub fn excerpt_length(&self) -> usize {
        self.services.with_value(|s| s.config.excerpt_length)
    }

    pub fn open(&self, overlay: Overlay) {
        self.set_overlay.set(Some(overlay));
    }

    pub fn close_overlay(&self) {
        self.set_overlay.set(None);
    }

    /// Show a toast that dismisses itself after the configured duration
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let duration = self.services.with_value(|s| s.config.toast_duration_ms);
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
