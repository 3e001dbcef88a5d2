//! # Config Commands
//!
//! Show and save shop settings. Saving always writes the whole record.

use tracing::debug;

use shopdesk_core::ShopConfig;

use crate::error::ApiError;
use crate::state::AppContext;

/// Gets the current shop configuration.
pub async fn get_config(ctx: &AppContext) -> ShopConfig {
    debug!("get_config command");
    ctx.config().await
}

/// Replaces the stored settings with `config`.
pub async fn save_settings(ctx: &AppContext, config: ShopConfig) -> Result<ShopConfig, ApiError> {
    debug!("save_settings command");
    ctx.save_config(config).await
}

/// Fields to change; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub webhook_url: Option<String>,
    pub shop_name: Option<String>,
    pub location: Option<String>,
    pub inquiry_contact_number: Option<String>,
    pub whatsapp_group_link: Option<String>,
    /// An empty string removes the order form link.
    pub order_form_url: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SettingsUpdate::default()
    }

    /// The complete record that results from applying this update.
    pub fn apply(self, mut config: ShopConfig) -> ShopConfig {
        if let Some(v) = self.webhook_url {
            config.webhook_url = v.trim().to_string();
        }
        if let Some(v) = self.shop_name {
            config.shop_name = v;
        }
        if let Some(v) = self.location {
            config.location = v;
        }
        if let Some(v) = self.inquiry_contact_number {
            config.inquiry_contact_number = v;
        }
        if let Some(v) = self.whatsapp_group_link {
            config.whatsapp_group_link = v;
        }
        if let Some(v) = self.order_form_url {
            config.order_form_url = shopdesk_core::validation::non_blank(&v);
        }
        config
    }
}

/// Applies `update` to the current settings and saves the result.
pub async fn update_settings(
    ctx: &AppContext,
    update: SettingsUpdate,
) -> Result<ShopConfig, ApiError> {
    debug!(?update, "update_settings command");
    let config = update.apply(ctx.config().await);
    ctx.save_config(config).await
}
