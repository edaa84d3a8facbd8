//! Article Reader and Video Player
//!
//! In-page viewers opened from a card.

use leptos::prelude::*;

use crate::models::{ItemId, ItemType};
use crate::store::{use_app_store, AppStateStoreFields};
use vault_core::card::format_date;

/// Full article; the body is admin-authored HTML from the editor
#[component]
pub fn ArticleReader(id: ItemId) -> impl IntoView {
    let store = use_app_store();

    let article = move || {
        store.items().with(|items| {
            items
                .iter()
                .find(|i| i.id == id && i.item_type == ItemType::Articles)
                .cloned()
        })
    };

    move || match article() {
        Some(item) => view! {
            <article class="article-reader">
                <h1>{item.title.clone()}</h1>
                <div class="article-meta">
                    {item.created_at.map(|dt| format_date(&dt.with_timezone(&chrono::Local)))}
                    {item.tags.iter().map(|t| view! { <span class="card-tag">"#" {t.clone()}</span> }).collect_view()}
                </div>
                {(!item.description.is_empty()).then(|| view! { <p class="article-lead">{item.description.clone()}</p> })}
                <div class="article-body" inner_html=item.content.clone()></div>
            </article>
        }.into_any(),
        None => view! { <p>"This article is no longer available."</p> }.into_any(),
    }
}

#[component]
pub fn VideoPlayer(title: String, embed_url: String) -> impl IntoView {
    view! {
        <div class="video-player">
            <h2>{title.clone()}</h2>
            <div class="video-frame">
                <iframe
                    src=embed_url
                    title=title
                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; picture-in-picture"
                    allowfullscreen=true
                ></iframe>
            </div>
        </div>
    }
}
