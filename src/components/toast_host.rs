//! Toast Host Component
//!
//! Stack of notifications; each dismisses itself or on click.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-container">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status" on:click=move |_| ctx.dismiss(id)>
                            <i class=toast.kind.icon()></i>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
