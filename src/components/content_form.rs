//! Content Form Component
//!
//! Add/edit modal. Validation runs before any upload; the form stays open
//! with its values intact when saving fails.

use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use vault_core::filter::all_tags;

use crate::bridge::{ProgressFn, RichEditor};
use crate::components::{TagInput, TypeSelector};
use crate::context::use_app_context;
use crate::models::{ContentSource, FormMode, FormState, ItemDraft, ItemType, ToastKind};
use crate::store::{store_find_item, store_set_form, use_app_store, AppStateStoreFields};

/// Mounts a fresh form body each time the form opens
#[component]
pub fn ContentForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    move || match store.form().get() {
        FormState::Closed => ().into_any(),
        FormState::Open(mode) => {
            let draft = match &mode {
                FormMode::Add => Some(ItemDraft::for_tab(store.current_tab().get_untracked())),
                FormMode::Edit(id) => store_find_item(&store, id).map(|item| ItemDraft::from_item(&item)),
            };
            match draft {
                Some(draft) => view! { <FormBody mode=mode draft=draft /> }.into_any(),
                None => {
                    ctx.notify(ToastKind::Error, "That item no longer exists");
                    store_set_form(&store, FormState::Closed);
                    ().into_any()
                }
            }
        }
    }
}

#[component]
fn FormBody(mode: FormMode, draft: ItemDraft) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_edit = matches!(mode, FormMode::Edit(_));
    let draft = RwSignal::new(draft);
    let selected_file = RwSignal::new_local(None::<web_sys::File>);
    let progress = RwSignal::new(None::<u8>);
    let submitting = RwSignal::new(false);
    let editor = StoredValue::new_local(None::<RichEditor>);
    let editor_ref = NodeRef::<html::Div>::new();

    let known_tags = Memo::new(move |_| store.items().with(|items| all_tags(items)));
    let item_type = Signal::derive(move || draft.with(|d| d.item_type));
    let source = Signal::derive(move || draft.with(|d| d.source));

    // The editor container only exists while the article source is shown
    Effect::new(move |_| {
        if let Some(el) = editor_ref.get() {
            let html = draft.with_untracked(|d| d.content.clone());
            editor.set_value(Some(RichEditor::mount(el.into(), &html)));
        }
    });

    let close = move || store_set_form(&store, FormState::Closed);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let mut current = draft.get_untracked();
        current.capture_editor(editor.with_value(|e| e.as_ref().map(|e| e.html())));
        let file = if current.source == ContentSource::File { selected_file.get_untracked() } else { None };
        let mode = mode.clone();
        let existing = match &mode {
            FormMode::Edit(id) => store_find_item(&store, id),
            FormMode::Add => None,
        };
        let vault = ctx.vault();
        let uploader = ctx.uploader();

        submitting.set(true);
        spawn_local(async move {
            let file_selected = file.is_some();
            let on_progress: ProgressFn = Rc::new(move |percent: u8| progress.set(Some(percent)));
            let upload = async move {
                match file {
                    Some(file) => uploader.upload(file, on_progress).await.map(Some),
                    None => Ok(None),
                }
            };

            let result = vault.submit(&mode, existing.as_ref(), current, file_selected, upload).await;
            submitting.set(false);
            progress.set(None);
            match result {
                Ok(id) => {
                    info!("[APP] Saved item {}", id);
                    ctx.notify(ToastKind::Success, if is_edit { "Changes saved" } else { "Item added" });
                    close();
                }
                Err(e) => {
                    error!("[APP] Saving failed: {}", e);
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    let file_accept = move || match item_type.get() {
        ItemType::Photos => "image/*",
        ItemType::Videos => "video/*",
        _ => "",
    };

    let existing_file_name = move || draft.with(|d| d.existing_file.as_ref().map(|(f, _)| f.file_name.clone()));

    view! {
        <div class="modal-backdrop" on:click=move |_| if !submitting.get_untracked() { close() }>
            <form class="modal content-form" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                <h2>{if is_edit { "Edit item" } else { "Add content" }}</h2>

                <TypeSelector
                    current_type=item_type
                    on_change=move |t: ItemType| {
                        let html = editor.with_value(|e| e.as_ref().map(|e| e.html()));
                        draft.update(|d| {
                            d.capture_editor(html);
                            d.set_type(t);
                        });
                    }
                />

                <label class="field">
                    <span>"Title"</span>
                    <input
                        type="text"
                        required
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </label>

                <Show when=move || (ContentSource::options_for(item_type.get()).len() > 1)>
                    <div class="source-selector">
                        {move || ContentSource::options_for(item_type.get()).iter().copied().map(|option| {
                            view! {
                                <button
                                    type="button"
                                    class=move || if source.get() == option { "source-btn active" } else { "source-btn" }
                                    on:click=move |_| draft.update(|d| d.source = option)
                                >
                                    {option.label()}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </Show>

                <Show when=move || source.get() == ContentSource::Url>
                    <label class="field">
                        <span>"URL"</span>
                        <input
                            type="url"
                            placeholder="https://"
                            prop:value=move || draft.with(|d| d.url.clone())
                            on:input=move |ev| draft.update(|d| d.url = event_target_value(&ev))
                        />
                    </label>
                </Show>

                <Show when=move || source.get() == ContentSource::File>
                    <label class="field">
                        <span>"File"</span>
                        <input
                            type="file"
                            accept=file_accept
                            on:change=move |ev| {
                                let input = event_target::<web_sys::HtmlInputElement>(&ev);
                                selected_file.set(input.files().and_then(|files| files.get(0)));
                            }
                        />
                        {move || match (selected_file.with(|f| f.is_some()), existing_file_name()) {
                            (false, Some(name)) => Some(view! { <small class="field-hint">"Current file: " {name}</small> }),
                            _ => None,
                        }}
                    </label>
                    {move || progress.get().map(|p| view! {
                        <div class="upload-progress">
                            <div class="upload-progress-bar" style=format!("width: {}%", p)></div>
                            <span>{p} "%"</span>
                        </div>
                    })}
                </Show>

                <Show when=move || source.get() == ContentSource::Editor>
                    <div class="field">
                        <span>"Content"</span>
                        <div class="rich-editor" node_ref=editor_ref></div>
                    </div>
                </Show>

                <label class="field">
                    <span>"Description"</span>
                    <textarea
                        rows="3"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </label>

                <div class="field">
                    <span>"Tags"</span>
                    <TagInput
                        tags=Signal::derive(move || draft.with(|d| d.tags.clone()))
                        known_tags=known_tags
                        on_add=move |raw: String| draft.update(|d| d.add_tags(&raw))
                        on_remove=move |name: String| draft.update(|d| d.remove_tag(&name))
                    />
                </div>

                <div class="form-actions">
                    <button type="button" class="btn btn-ghost" on:click=move |_| close() disabled=move || submitting.get()>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
