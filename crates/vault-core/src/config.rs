//! Configuration
//!
//! Supplied by the page as a JSON object; every field has a default so an
//! empty or missing object yields a working local-only vault.

use serde::{Deserialize, Serialize};

const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Firebase web app settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseConfig {
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY && !self.project_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultConfig {
    pub firebase: Option<FirebaseConfig>,
    /// Slot holding the serialized item collection
    pub items_key: String,
    /// Slot holding the admin session and local credential
    pub admin_key: String,
    pub toast_duration_ms: u32,
    pub local_upload_limit_bytes: u64,
    pub excerpt_length: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            firebase: None,
            items_key: "contentVaultItems".to_string(),
            admin_key: "contentVaultAdmin".to_string(),
            toast_duration_ms: 3000,
            local_upload_limit_bytes: 2 * 1024 * 1024,
            excerpt_length: 150,
        }
    }
}

impl VaultConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Firebase settings, only when they are usable
    pub fn cloud(&self) -> Option<&FirebaseConfig> {
        self.firebase.as_ref().filter(|f| f.is_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = VaultConfig::from_json("{}").unwrap();
        assert_eq!(config, VaultConfig::default());
        assert!(config.cloud().is_none());
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let config = VaultConfig::from_json(
            r#"{"firebase": {"apiKey": "YOUR_API_KEY", "projectId": "demo"}, "toastDurationMs": 5000}"#,
        )
        .unwrap();
        assert!(config.cloud().is_none());
        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.items_key, "contentVaultItems");
    }

    #[test]
    fn test_real_key_is_configured() {
        let config = VaultConfig::from_json(r#"{"firebase": {"apiKey": "AIzaExample", "projectId": "vault-demo"}}"#).unwrap();
        assert_eq!(config.cloud().map(|f| f.project_id.as_str()), Some("vault-demo"));
    }
}
