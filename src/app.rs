//! Content Vault Frontend App
//!
//! Header, tab bar, tag filter and card grid, with the form and modals
//! layered on top.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{ContentForm, ContentGrid, Header, OverlayHost, TabBar, TagFilterBar, ToastHost};
use crate::context::AppContext;
use crate::models::{BackendKind, Snapshot, SnapshotOrigin, ToastKind};
use crate::services::Services;
use crate::store::{store_apply_snapshot, store_set_session, AppState};

#[component]
pub fn App(services: Services) -> impl IntoView {
    let ctx = AppContext::new(services.clone());
    let store = Store::new(AppState::new(services.auth.current_session()));

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    services.watch_session(move |session| store_set_session(&store, session));

    services.vault.backend().subscribe(Rc::new(move |snapshot: Snapshot| {
        log::info!("[APP] Snapshot with {} items", snapshot.items.len());
        if let SnapshotOrigin::Fallback { reason } = &snapshot.origin {
            ctx.notify(ToastKind::Warning, format!("Showing the last saved copy: {}", reason));
        }
        store_apply_snapshot(&store, snapshot.items);
    }));

    if services.kind() == BackendKind::Local {
        ctx.notify(ToastKind::Warning, "Cloud storage is not configured. Content is saved in this browser only.");
    }

    view! {
        <div class="app-layout">
            <Header backend=services.kind() />

            <main class="main-content">
                <TabBar />
                <TagFilterBar />
                <ContentGrid />
            </main>

            <ContentForm />
            <OverlayHost />
            <ToastHost />
        </div>
    }
}
