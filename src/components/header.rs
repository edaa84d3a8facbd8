//! Header Component
//!
//! Brand, storage mode badge and the admin controls.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::context::use_app_context;
use crate::models::{BackendKind, FormState, Overlay, ToastKind};
use crate::store::{store_is_admin, store_set_form, store_set_session, use_app_store, AppStateStoreFields};

#[component]
pub fn Header(backend: BackendKind) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_admin = move || store_is_admin(&store);
    let admin_email = move || store.session().with(|s| s.as_ref().map(|s| s.email.clone()).unwrap_or_default());

    let on_add = move |_| store_set_form(&store, FormState::open_add());

    let on_logout = move |_| {
        let auth = ctx.auth();
        spawn_local(async move {
            // The local session is gone either way
            if let Err(e) = auth.logout().await {
                warn!("[AUTH] Sign-out reported an error: {}", e);
                ctx.notify(ToastKind::Warning, e.user_message());
            } else {
                ctx.notify(ToastKind::Info, "Signed out");
            }
            store_set_session(&store, None);
            store_set_form(&store, FormState::Closed);
            ctx.close_overlay();
        });
    };

    let badge_title = match backend {
        BackendKind::Cloud => "Synced with the cloud",
        BackendKind::Local => "Saved in this browser only",
    };

    view! {
        <header class="app-header">
            <div class="brand">
                <i class="fas fa-vault"></i>
                <span class="brand-name">"Content Vault"</span>
                <span class=format!("backend-badge {}", backend.label()) title=badge_title>
                    {backend.label()}
                </span>
            </div>

            <div class="header-actions">
                {move || if is_admin() {
                    view! {
                        <button class="btn btn-primary" on:click=on_add>
                            <i class="fas fa-plus"></i>
                            " Add"
                        </button>
                        <span class="admin-email">{admin_email}</span>
                        <button class="btn btn-ghost" title="Recent log" on:click=move |_| ctx.open(Overlay::Logs)>
                            <i class="fas fa-list"></i>
                        </button>
                        <button class="btn btn-ghost" title="Sign out" on:click=on_logout>
                            <i class="fas fa-sign-out-alt"></i>
                        </button>
                    }.into_any()
                } else {
                    view! {
                        <button class="btn btn-ghost" on:click=move |_| ctx.open(Overlay::Login)>
                            <i class="fas fa-user-shield"></i>
                            " Admin"
                        </button>
                    }.into_any()
                }}
            </div>
        </header>
    }
}
