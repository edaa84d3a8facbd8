//! Type Selector Component
//!
//! Reusable item type selector buttons.

use leptos::prelude::*;

use crate::models::ItemType;

/// Type selector buttons for the add/edit form
#[component]
pub fn TypeSelector(
    #[prop(into)] current_type: Signal<ItemType>,
    #[prop(into)] on_change: Callback<ItemType>,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {ItemType::SELECTABLE.iter().copied().map(|item_type| {
                let is_selected = move || current_type.get() == item_type;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| on_change.run(item_type)
                    >
                        <i class=format!("fas {}", item_type.icon())></i>
                        <span>{item_type.label()}</span>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
