//! JS Bridge
//!
//! Bindings to the page's JavaScript modules, organized by concern.
//! Bridge failures are turned into domain errors here; nothing above this
//! layer sees a raw `JsValue` error.

mod auth;
mod cloud;
mod config;
mod editor;
mod local;
mod upload;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use vault_core::VaultError;

#[wasm_bindgen(module = "/js/firebase_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = initFirebase)]
    async fn init_firebase(config: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = subscribeItems)]
    fn subscribe_items(on_snapshot: &Closure<dyn FnMut(JsValue)>, on_error: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(catch, js_name = addItem)]
    async fn add_item(fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = updateItem)]
    async fn update_item(id: &str, fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = deleteItem)]
    async fn delete_item(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = deleteBlob)]
    async fn delete_blob(path: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = uploadFile)]
    async fn upload_file(
        file: &web_sys::File,
        path: &str,
        on_progress: &Closure<dyn FnMut(f64, f64)>,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signIn)]
    async fn sign_in(email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signOut)]
    async fn sign_out() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onAuthChanged)]
    fn on_auth_changed(callback: &Closure<dyn FnMut(JsValue)>);
}

pub use auth::{watch_auth_state, CloudAuth};
pub use cloud::CloudBackend;
pub use config::{init_cloud, load_config};
pub use editor::RichEditor;
pub use local::BrowserStorage;
pub use upload::{CloudUploader, DataUrlUploader, ProgressFn, Uploader};

/// Error object thrown by the Firebase bridge
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BridgeError {
    code: String,
    message: String,
}

impl BridgeError {
    fn from_js(value: JsValue) -> Self {
        serde_wasm_bindgen::from_value::<BridgeError>(value.clone()).unwrap_or_else(|_| BridgeError {
            code: "unknown".to_string(),
            message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        })
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Plain JS object (maps as objects, `None` as null) for Firestore
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, VaultError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| VaultError::Serialization(e.to_string()))
}

fn storage_error(value: JsValue) -> VaultError {
    VaultError::Storage(BridgeError::from_js(value).to_string())
}
