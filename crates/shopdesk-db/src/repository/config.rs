//! # Config Store
//!
//! Loads and saves the [`ShopConfig`] record under [`CONFIG_KEY`].
//!
//! ## Load Never Fails
//! ```text
//! store.get("n8n-config")
//!   ├── Ok(Some(json)) ── parses?  ── yes → stored config
//!   │                               └─ no  → defaults  (warn!)
//!   ├── Ok(None)       ─────────────────── → defaults  (debug!)
//!   └── Err(e)         ─────────────────── → defaults  (warn!)
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use shopdesk_core::ShopConfig;

use crate::error::DbResult;
use crate::kv::KeyValueStore;

/// Storage key of the configuration record.
pub const CONFIG_KEY: &str = "n8n-config";

#[derive(Clone)]
pub struct ConfigStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        ConfigStore { store }
    }

    /// Returns the stored config, or defaults when it is absent or unreadable.
    pub async fn load(&self) -> ShopConfig {
        match self.store.get(CONFIG_KEY).await {
            Ok(Some(stored)) => match serde_json::from_str::<ShopConfig>(&stored.value) {
                Ok(config) => {
                    debug!(shop = %config.shop_name, "Loaded shop configuration");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "Stored configuration is corrupt, using defaults");
                    ShopConfig::default()
                }
            },
            Ok(None) => {
                debug!("No stored configuration, using defaults");
                ShopConfig::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read configuration, using defaults");
                ShopConfig::default()
            }
        }
    }

    /// Replaces the stored record with `config`.
    pub async fn save(&self, config: &ShopConfig) -> DbResult<()> {
        let json = serde_json::to_string(config)?;
        self.store.set(CONFIG_KEY, &json).await?;

        info!(
            shop = %config.shop_name,
            webhook_configured = config.is_webhook_configured(),
            "Settings saved"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::kv::{MemoryStore, StoredValue};
    use crate::pool::{Database, DbConfig};
    use async_trait::async_trait;

    /// A store whose every call fails.
    pub(crate) struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> DbResult<Option<StoredValue>> {
            Err(DbError::ConnectionFailed("disk unplugged".to_string()))
        }
        async fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
            Err(DbError::ConnectionFailed("disk unplugged".to_string()))
        }
        async fn delete(&self, _key: &str) -> DbResult<bool> {
            Err(DbError::ConnectionFailed("disk unplugged".to_string()))
        }
        async fn list(&self, _prefix: &str) -> DbResult<Vec<String>> {
            Err(DbError::ConnectionFailed("disk unplugged".to_string()))
        }
    }

    fn custom() -> ShopConfig {
        ShopConfig {
            webhook_url: "https://n8n.example.com/webhook/shop".to_string(),
            shop_name: "Kilimani Phones".to_string(),
            order_form_url: Some("https://forms.example.com/order".to_string()),
            ..ShopConfig::default()
        }
    }

    #[tokio::test]
    async fn test_absent_record_gives_defaults() {
        let store = ConfigStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.load().await, ShopConfig::default());
    }

    #[tokio::test]
    async fn test_corrupt_record_gives_defaults() {
        let store = ConfigStore::new(Arc::new(MemoryStore::with_entries([(
            CONFIG_KEY,
            "{not json",
        )])));
        assert_eq!(store.load().await, ShopConfig::default());
    }

    #[tokio::test]
    async fn test_read_failure_gives_defaults() {
        let store = ConfigStore::new(Arc::new(BrokenStore));
        assert_eq!(store.load().await, ShopConfig::default());
        assert!(store.save(&custom()).await.is_err());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = ConfigStore::new(Arc::new(MemoryStore::new()));
        store.save(&custom()).await.unwrap();
        assert_eq!(store.load().await, custom());
    }

    #[tokio::test]
    async fn test_legacy_record_keys() {
        let legacy = r#"{
            "webhookUrl": "https://n8n.example.com/webhook/shop",
            "shopName": "Tech Mobile Store",
            "inquiryNumber": "+254700111222",
            "whatsappGroup": "https://chat.whatsapp.com/abc"
        }"#;
        let store = ConfigStore::new(Arc::new(MemoryStore::with_entries([(CONFIG_KEY, legacy)])));

        let config = store.load().await;
        assert_eq!(config.inquiry_contact_number, "+254700111222");
        assert_eq!(config.whatsapp_group_link, "https://chat.whatsapp.com/abc");
        assert_eq!(config.location, ShopConfig::default().location);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdesk.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            ConfigStore::new(Arc::new(db.clone())).save(&custom()).await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(ConfigStore::new(Arc::new(db)).load().await, custom());
    }
}
