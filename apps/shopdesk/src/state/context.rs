//! # Application Context
//!
//! Everything a command needs, passed explicitly.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppContext                                                             │
//! │  ├── config:  RwLock<ShopConfig>     ◄── written only via save_config   │
//! │  ├── session: RwLock<SessionState>   ◄── written only via establish /   │
//! │  │                                       clear_session                  │
//! │  ├── config_store  ─┐                                                   │
//! │  ├── session_store ─┴─► Arc<dyn KeyValueStore>                          │
//! │  └── transport: Arc<dyn WebhookTransport>                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! In-memory copies change only after the store write succeeded, so memory
//! never runs ahead of disk.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use shopdesk_core::{AuthSession, SessionState, SessionUser, ShopConfig};
use shopdesk_db::{ConfigStore, KeyValueStore, SessionStore};
use shopdesk_webhook::WebhookTransport;

use crate::error::ApiError;

pub struct AppContext {
    config: RwLock<ShopConfig>,
    session: RwLock<SessionState>,
    config_store: ConfigStore,
    session_store: SessionStore,
    transport: Arc<dyn WebhookTransport>,
}

impl AppContext {
    /// Loads config and session from `store`. Never fails: unreadable
    /// records fall back to defaults / logged out.
    pub async fn load(store: Arc<dyn KeyValueStore>, transport: Arc<dyn WebhookTransport>) -> Self {
        let config_store = ConfigStore::new(store.clone());
        let session_store = SessionStore::new(store);

        let config = config_store.load().await;
        let session = session_store.restore().await;

        info!(
            shop = %config.shop_name,
            webhook_configured = config.is_webhook_configured(),
            logged_in = session.is_authenticated(),
            "Application context ready"
        );

        AppContext {
            config: RwLock::new(config),
            session: RwLock::new(session),
            config_store,
            session_store,
            transport,
        }
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> ShopConfig {
        self.config.read().await.clone()
    }

    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.session.read().await.user().cloned()
    }

    pub fn transport(&self) -> &dyn WebhookTransport {
        self.transport.as_ref()
    }

    /// Validates and persists `config`, then makes it current.
    pub async fn save_config(&self, config: ShopConfig) -> Result<ShopConfig, ApiError> {
        config.validate()?;
        self.config_store.save(&config).await?;
        *self.config.write().await = config.clone();
        Ok(config)
    }

    pub async fn establish_session(&self, user: SessionUser) -> Result<AuthSession, ApiError> {
        let session = self.session_store.establish(user).await?;
        *self.session.write().await = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    pub async fn clear_session(&self) -> Result<(), ApiError> {
        self.session_store.clear().await?;
        *self.session.write().await = SessionState::Unauthenticated;
        Ok(())
    }
}
