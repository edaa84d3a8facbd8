//! Frontend Models
//!
//! Domain types come from vault-core; this module adds the UI-only ones.

pub use vault_core::{
    BackendKind, CardAction, CardLayout, CardView, ContentSource, FormMode, FormState, Item, ItemDraft, ItemId,
    ItemType, Session, Snapshot, SnapshotOrigin, Tab,
};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Info => "toast toast-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Error => "fas fa-exclamation-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
            ToastKind::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Modal shown above the grid (the add/edit form has its own state)
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Login,
    /// Admin menu for one item: edit, view, delete
    Options(ItemId),
    /// Article reader, looked up by id so it follows live updates
    Reader(ItemId),
    Player { title: String, embed_url: String },
    /// Recent log lines kept in memory
    Logs,
}
