//! Overlay Host Component
//!
//! Renders whichever modal is open, with a shared backdrop. Escape closes it.

use leptos::ev;
use leptos::prelude::*;

use crate::components::{ArticleReader, LogViewer, LoginModal, OptionsMenu, VideoPlayer};
use crate::context::use_app_context;
use crate::models::{FormState, Overlay};
use crate::store::{store_set_form, use_app_store, AppStateStoreFields};

#[component]
pub fn OverlayHost() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let _escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() != "Escape" {
            return;
        }
        if ctx.overlay.get_untracked().is_some() {
            ctx.close_overlay();
        } else if store.form().with_untracked(|f| f.is_open()) {
            store_set_form(&store, FormState::Closed);
        }
    });

    move || {
        ctx.overlay.get().map(|overlay| {
            let (class, body) = match overlay {
                Overlay::Login => ("modal modal-small", view! { <LoginModal /> }.into_any()),
                Overlay::Options(id) => ("modal modal-small", view! { <OptionsMenu id=id /> }.into_any()),
                Overlay::Reader(id) => ("modal modal-wide", view! { <ArticleReader id=id /> }.into_any()),
                Overlay::Logs => ("modal modal-wide", view! { <LogViewer /> }.into_any()),
                Overlay::Player { title, embed_url } => (
                    "modal modal-wide",
                    view! { <VideoPlayer title=title embed_url=embed_url /> }.into_any(),
                ),
            };
            view! {
                <div class="modal-backdrop" on:click=move |_| ctx.close_overlay()>
                    <div class=class on:click=|ev| ev.stop_propagation()>
                        <button type="button" class="modal-close" title="Close" on:click=move |_| ctx.close_overlay()>
                            <i class="fas fa-times"></i>
                        </button>
                        {body}
                    </div>
                </div>
            }
        })
    }
}
