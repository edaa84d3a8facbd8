//! Page configuration and cloud start-up

use log::{info, warn};
use wasm_bindgen::prelude::*;

use vault_core::{FirebaseConfig, VaultConfig};

use super::{init_firebase, BridgeError};

const CONFIG_GLOBAL: &str = "CONTENT_VAULT_CONFIG";

/// Read `window.CONTENT_VAULT_CONFIG`, falling back to defaults
pub fn load_config() -> VaultConfig {
    let Some(window) = web_sys::window() else {
        return VaultConfig::default();
    };
    match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => {
            serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                warn!("[APP] Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                VaultConfig::default()
            })
        }
        _ => {
            info!("[APP] No {} on the page, using defaults", CONFIG_GLOBAL);
            VaultConfig::default()
        }
    }
}

pub async fn init_cloud(config: &FirebaseConfig) -> Result<(), String> {
    let js_config = serde_wasm_bindgen::to_value(config).map_err(|e| e.to_string())?;
    init_firebase(js_config)
        .await
        .map_err(|e| BridgeError::from_js(e).to_string())?;
    info!("[CLOUD] Firebase initialized for project {}", config.project_id);
    Ok(())
}
