//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use vault_core::find_by_id;

use crate::models::{FormState, Item, Session, Tab};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Latest snapshot, newest first
    pub items: Vec<Item>,
    /// False until the first snapshot arrives
    pub loaded: bool,
    pub current_tab: Tab,
    /// Active tag filter (single-select)
    pub current_tag: Option<String>,
    /// Signed-in admin, if any
    pub session: Option<Session>,
    pub form: FormState,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the item set with a new snapshot
pub fn store_apply_snapshot(store: &AppStore, items: Vec<Item>) {
    let tab = store.current_tab().get_untracked();
    let current = store.current_tag().get_untracked();
    let tag = vault_core::filter::reconcile_tag(&items, tab, current.as_deref());
    if tag != current {
        *store.current_tag().write() = tag;
    }
    *store.items().write() = items;
    *store.loaded().write() = true;
}

/// Switch tab; the tag filter does not carry over
pub fn store_select_tab(store: &AppStore, tab: Tab) {
    *store.current_tab().write() = tab;
    *store.current_tag().write() = None;
}

pub fn store_toggle_tag(store: &AppStore, tag: &str) {
    let next = vault_core::filter::toggle_tag(store.current_tag().get_untracked().as_deref(), tag);
    *store.current_tag().write() = next;
}

/// Find an item by id without tracking
pub fn store_find_item(store: &AppStore, id: &str) -> Option<Item> {
    store.items().with_untracked(|items| find_by_id(items, &id.to_string()).cloned())
}

pub fn store_is_admin(store: &AppStore) -> bool {
    store.session().with(|s| s.as_ref().is_some_and(|s| s.is_admin))
}

pub fn store_set_session(store: &AppStore, session: Option<Session>) {
    *store.session().write() = session;
}

pub fn store_set_form(store: &AppStore, form: FormState) {
    *store.form().write() = form;
}
