//! Tag Filter Bar Component
//!
//! Tags found in the active tab; clicking one narrows the grid, clicking it
//! again clears the filter.

use leptos::prelude::*;
use vault_core::filter::tag_options;

use crate::store::{store_toggle_tag, use_app_store, AppStateStoreFields};

#[component]
pub fn TagFilterBar() -> impl IntoView {
    let store = use_app_store();

    let options = Memo::new(move |_| {
        let tab = store.current_tab().get();
        store.items().with(|items| tag_options(items, tab))
    });

    view! {
        <Show when=move || options.with(|o| !o.is_empty())>
            <div class="tag-filter-bar">
                <For
                    each=move || options.get()
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let clicked = tag.clone();
                        let active_tag = tag.clone();
                        let is_active = move || store.current_tag().with(|t| t.as_deref() == Some(active_tag.as_str()));
                        view! {
                            <button
                                class=move || if is_active() { "tag-chip active" } else { "tag-chip" }
                                on:click=move |_| store_toggle_tag(&store, &clicked)
                            >
                                "#" {tag}
                            </button>
                        }
                    }
                />
            </div>
        </Show>
    }
}
