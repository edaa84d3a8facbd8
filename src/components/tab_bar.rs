//! Tab Bar Component
//!
//! One tab per content type plus "all", with item counts.

use leptos::prelude::*;
use vault_core::filter::by_tab;

use crate::models::Tab;
use crate::store::{store_select_tab, use_app_store, AppStateStoreFields};

#[component]
pub fn TabBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="tab-bar">
            {Tab::ALL_TABS.iter().copied().map(|tab| {
                let is_active = move || store.current_tab().get() == tab;
                let count = move || store.items().with(|items| by_tab(items, tab).count());
                view! {
                    <button
                        class=move || if is_active() { "tab active" } else { "tab" }
                        on:click=move |_| store_select_tab(&store, tab)
                    >
                        <i class=format!("fas {}", tab.icon())></i>
                        <span class="tab-label">{tab.label()}</span>
                        <span class="tab-count">{count}</span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
