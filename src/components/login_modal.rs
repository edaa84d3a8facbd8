//! Login Modal Component
//!
//! Admin sign-in. In local mode the first sign-in registers the admin.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::context::use_app_context;
use crate::models::{BackendKind, ToastKind};
use crate::store::{store_set_session, use_app_store};

#[component]
pub fn LoginModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let is_local = ctx.vault().kind() == BackendKind::Local;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let auth = ctx.auth();
        let (e, p) = (email.get_untracked(), password.get_untracked());
        pending.set(true);
        error.set(None);
        spawn_local(async move {
            match auth.login(&e, &p).await {
                Ok(session) => {
                    ctx.notify(ToastKind::Success, format!("Signed in as {}", session.email));
                    store_set_session(&store, Some(session));
                    ctx.close_overlay();
                }
                Err(err) => {
                    warn!("[AUTH] Sign-in failed: {}", err);
                    error.set(Some(err.user_message().to_string()));
                    ctx.notify(ToastKind::Error, err.user_message());
                }
            }
            pending.set(false);
        });
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <h2>
                <i class="fas fa-user-shield"></i>
                " Admin sign-in"
            </h2>
            {is_local.then(|| view! {
                <p class="field-hint">
                    "No cloud account is configured. The first sign-in on this browser becomes the admin account."
                </p>
            })}
            <label class="field">
                <span>"Email"</span>
                <input
                    type="email"
                    autocomplete="username"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="field">
                <span>"Password"</span>
                <input
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in…" } else { "Sign in" }}
                </button>
            </div>
        </form>
    }
}
