//! Item Card Component
//!
//! Compact card for links and files, preview card for photos, videos and
//! articles. A click opens the admin menu for admins and the content for
//! everyone else.

use leptos::prelude::*;
use log::warn;

use crate::context::{use_app_context, AppContext};
use crate::models::{CardAction, CardLayout, CardView, Item, ItemType, Overlay};
use crate::store::{store_is_admin, store_toggle_tag, use_app_store};

/// Carry out a card action
pub fn perform_action(ctx: AppContext, item: &Item, action: CardAction) {
    match action {
        CardAction::ShowOptions(id) => ctx.open(Overlay::Options(id)),
        CardAction::OpenReader(id) => ctx.open(Overlay::Reader(id)),
        CardAction::OpenPlayer { embed_url } => ctx.open(Overlay::Player {
            title: item.title.clone(),
            embed_url,
        }),
        CardAction::OpenExternal(url) => open_external(&url),
        CardAction::None => {}
    }
}

/// Open a URL in a new browsing context
fn open_external(url: &str) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        warn!("[APP] Could not open {}: {:?}", url, e);
    }
}

#[component]
pub fn ItemCard(item: Item) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let card = CardView::build(&item, ctx.excerpt_length());
    let item = StoredValue::new(item);

    let on_click = move |_| {
        let is_admin = store_is_admin(&store);
        item.with_value(|item| perform_action(ctx, item, CardAction::for_item(item, is_admin)));
    };

    let card_class = format!(
        "card {} card-{}",
        match card.layout {
            CardLayout::Compact => "card-compact",
            CardLayout::Preview => "card-preview",
        },
        card.item_type.as_str()
    );

    let tags = card.tags.clone();
    let tag_list = view! {
        <div class="card-tags">
            {tags.into_iter().map(|tag| {
                let clicked = tag.clone();
                view! {
                    <span
                        class="card-tag"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            store_toggle_tag(&store, &clicked);
                        }
                    >
                        "#" {tag}
                    </span>
                }
            }).collect_view()}
        </div>
    };

    let admin_hint = view! {
        <Show when=move || store_is_admin(&store)>
            <span class="card-admin-hint" title="Options">
                <i class="fas fa-ellipsis-h"></i>
            </span>
        </Show>
    };

    match card.layout {
        CardLayout::Compact => view! {
            <article class=card_class on:click=on_click>
                <div class="card-icon">
                    {match card.favicon.clone() {
                        Some(src) => view! { <img src=src alt="" loading="lazy" /> }.into_any(),
                        None => view! { <i class=format!("fas {}", card.icon)></i> }.into_any(),
                    }}
                </div>
                <div class="card-body">
                    <h3 class="card-title">{card.title.clone()}</h3>
                    {card.subtitle.clone().map(|s| view! { <p class="card-subtitle">{s}</p> })}
                    {card.description.clone().map(|d| view! { <p class="card-description">{d}</p> })}
                    <div class="card-meta">
                        {card.size_label.clone().map(|s| view! { <span class="card-size">{s}</span> })}
                        {card.date_label.clone().map(|d| view! { <span class="card-date">{d}</span> })}
                    </div>
                    {tag_list}
                </div>
                {admin_hint}
            </article>
        }.into_any(),
        CardLayout::Preview => view! {
            <article class=card_class on:click=on_click>
                <div class="card-preview-area">
                    {preview(&card)}
                    <span class="type-badge">
                        <i class=format!("fas {}", card.icon)></i>
                        " " {card.type_label}
                    </span>
                </div>
                <div class="card-body">
                    <h3 class="card-title">{card.title.clone()}</h3>
                    {card.subtitle.clone().map(|s| view! { <p class="card-subtitle">{s}</p> })}
                    {card.description.clone().map(|d| view! { <p class="card-description">{d}</p> })}
                    {card.date_label.clone().map(|d| view! { <span class="card-date">{d}</span> })}
                    {tag_list}
                </div>
                {admin_hint}
            </article>
        }.into_any(),
    }
}

fn preview(card: &CardView) -> AnyView {
    match card.item_type {
        ItemType::Photos => match card.thumbnail.clone() {
            Some(src) => view! { <img class="card-thumbnail" src=src alt=card.title.clone() loading="lazy" /> }.into_any(),
            None => view! { <i class="fas fa-image card-placeholder"></i> }.into_any(),
        },
        ItemType::Videos => view! {
            <div class="video-thumb">
                <i class="fas fa-play-circle"></i>
            </div>
        }.into_any(),
        _ => view! {
            <p class="article-excerpt">{card.excerpt.clone().unwrap_or_default()}</p>
        }.into_any(),
    }
}
