//! UI Components
//!
//! Reusable Leptos components.

mod article_reader;
mod content_form;
mod content_grid;
mod header;
mod item_card;
mod log_viewer;
mod login_modal;
mod options_menu;
mod overlay_host;
mod tab_bar;
mod tag_filter_bar;
mod tag_input;
mod toast_host;
mod type_selector;

pub use article_reader::{ArticleReader, VideoPlayer};
pub use content_form::ContentForm;
pub use content_grid::ContentGrid;
pub use header::Header;
pub use item_card::{perform_action, ItemCard};
pub use log_viewer::LogViewer;
pub use login_modal::LoginModal;
pub use options_menu::OptionsMenu;
pub use overlay_host::OverlayHost;
pub use tab_bar::TabBar;
pub use tag_filter_bar::TagFilterBar;
pub use tag_input::TagInput;
pub use toast_host::ToastHost;
pub use type_selector::TypeSelector;
