#![allow(warnings)]
//! Content Vault Frontend Entry Point

mod app;
mod bridge;
mod components;
mod context;
mod models;
mod services;
mod store;

use app::App;
use leptos::prelude::*;
use services::Services;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("content-vault") {
        web_sys::console::warn_1(&format!("[APP] Logger already installed: {}", e).into());
    }

    let config = bridge::load_config();
    // Backend selection finishes before anything renders
    wasm_bindgen_futures::spawn_local(async move {
        let services = Services::select(config).await;
        log::info!("[APP] Mounting with {} storage", services.kind().label());
        mount_to_body(move || view! { <App services=services /> });
        hide_loader();
    });
}

/// Remove the static loading indicator shipped in index.html
fn hide_loader() {
    if let Some(loader) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("loader"))
    {
        loader.remove();
    }
}
