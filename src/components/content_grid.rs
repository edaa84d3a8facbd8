//! Content Grid Component
//!
//! Cards for the visible set, or an empty state.

use leptos::prelude::*;
use vault_core::filter::visible_items;

use crate::components::ItemCard;
use crate::models::FormState;
use crate::store::{store_is_admin, store_set_form, use_app_store, AppStateStoreFields};

#[component]
pub fn ContentGrid() -> impl IntoView {
    let store = use_app_store();

    let visible = Memo::new(move |_| {
        let tab = store.current_tab().get();
        let tag = store.current_tag().get();
        store.items().with(|items| visible_items(items, tab, tag.as_deref()))
    });

    view! {
        <Show
            when=move || store.loaded().get()
            fallback=|| view! {
                <div class="grid-loading">
                    <i class="fas fa-spinner fa-spin"></i>
                </div>
            }
        >
            <Show
                when=move || visible.with(|v| !v.is_empty())
                fallback=|| view! { <EmptyState /> }
            >
                <div class="content-grid">
                    <For
                        each=move || visible.get()
                        key=|item| (item.id.clone(), item.updated_at)
                        children=move |item| view! { <ItemCard item=item /> }
                    />
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    let store = use_app_store();

    let message = move || match store.current_tag().get() {
        Some(tag) => format!("Nothing tagged #{} here yet.", tag),
        None => format!("No {} saved yet.", store.current_tab().get().label().to_lowercase()),
    };

    view! {
        <div class="empty-state">
            <i class=move || format!("fas {}", store.current_tab().get().icon())></i>
            <p>{message}</p>
            <Show when=move || store_is_admin(&store)>
                <button class="btn btn-primary" on:click=move |_| store_set_form(&store, FormState::open_add())>
                    <i class="fas fa-plus"></i>
                    " Add the first one"
                </button>
            </Show>
        </div>
    }
}
