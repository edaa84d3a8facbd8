//! Options Menu Component
//!
//! Admin actions for one item: edit, view, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::perform_action;
use crate::context::use_app_context;
use crate::models::{CardAction, FormState, ItemId, ToastKind};
use crate::store::{store_find_item, store_set_form, use_app_store, AppStateStoreFields};

#[component]
pub fn OptionsMenu(id: ItemId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let deleting = RwSignal::new(false);

    let lookup_id = id.clone();
    let title = move || {
        store
            .items()
            .with(|items| items.iter().find(|i| i.id == lookup_id).map(|i| i.title.clone()))
    };

    let edit_id = id.clone();
    let on_edit = move |_| {
        ctx.close_overlay();
        store_set_form(&store, FormState::open_edit(edit_id.clone()));
    };

    let view_id = id.clone();
    let on_view = move |_| {
        if let Some(item) = store_find_item(&store, &view_id) {
            ctx.close_overlay();
            perform_action(ctx, &item, CardAction::view(&item));
        }
    };

    let delete_id = id.clone();
    let on_delete = move |_: ()| {
        let Some(item) = store_find_item(&store, &delete_id) else {
            ctx.close_overlay();
            return;
        };
        let vault = ctx.vault();
        deleting.set(true);
        spawn_local(async move {
            match vault.remove(&item).await {
                Ok(()) => {
                    ctx.notify(ToastKind::Success, "Item deleted");
                    ctx.close_overlay();
                }
                Err(e) => {
                    error!("[APP] Delete of {} failed: {}", item.id, e);
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
            deleting.set(false);
        });
    };

    view! {
        <div class="options-menu">
            {move || match title() {
                Some(title) => view! { <h3>{title}</h3> }.into_any(),
                None => view! { <p>"This item no longer exists."</p> }.into_any(),
            }}
            <button type="button" class="option-btn" on:click=on_edit>
                <i class="fas fa-edit"></i>
                " Edit"
            </button>
            <button type="button" class="option-btn" on:click=on_view>
                <i class="fas fa-eye"></i>
                " View"
            </button>
            <DeleteItemButton on_confirm=on_delete deleting=deleting />
        </div>
    }
}

/// Delete action that asks once more inline. While the removal runs the
/// confirm button is disabled and shows a spinner.
#[component]
fn DeleteItemButton(#[prop(into)] on_confirm: Callback<()>, deleting: RwSignal<bool>) -> impl IntoView {
    let asking = RwSignal::new(false);

    view! {
        <Show
            when=move || asking.get()
            fallback=move || view! {
                <button type="button" class="option-btn danger" on:click=move |_| asking.set(true)>
                    <i class="fas fa-trash"></i>
                    " Delete"
                </button>
            }
        >
            <div class="delete-confirm">
                <span>"Delete this item for good?"</span>
                <button
                    type="button"
                    class="confirm-btn"
                    disabled=move || deleting.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {move || if deleting.get() {
                        view! { <i class="fas fa-spinner fa-spin"></i> }.into_any()
                    } else {
                        view! { <span>"Yes, delete"</span> }.into_any()
                    }}
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    disabled=move || deleting.get()
                    on:click=move |_| asking.set(false)
                >
                    "Keep"
                </button>
            </div>
        </Show>
    }
}
