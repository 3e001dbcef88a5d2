//! # Shop Configuration
//!
//! The operator-editable identity of one shop and the webhook it reports to.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start ──► ShopConfig::default()                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ConfigStore::load() ──► stored record replaces defaults (if any)      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  "Save settings" ──► validate() ──► ConfigStore::save(whole record)    │
//! │                                                                         │
//! │  Never deleted. Never merged field by field.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Shape
//! Records written by earlier releases used `inquiryNumber` and
//! `whatsappGroup`; both are still accepted when loading. Fields missing
//! from a stored record take their default value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{is_blank, validate_http_url, validate_phone, ValidationResult};

/// Shop identity and integration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ShopConfig {
    /// Absolute URL of the n8n webhook. Empty until configured.
    pub webhook_url: String,

    /// Shop name shown in customer messages.
    pub shop_name: String,

    /// Town / area of the shop.
    pub location: String,

    /// Phone number customers call with questions.
    #[serde(alias = "inquiryNumber")]
    pub inquiry_contact_number: String,

    /// Invite link of the customers' WhatsApp group.
    #[serde(alias = "whatsappGroup")]
    pub whatsapp_group_link: String,

    /// Public order form, if the shop has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_form_url: Option<String>,
}

impl Default for ShopConfig {
    /// Returns the built-in configuration used until settings are saved.
    ///
    /// ## Default Values
    /// - Webhook: empty (blocks every network action)
    /// - Shop: "Tech Mobile Store", Murang'a, Kenya
    /// - Inquiry number: +254712345678
    fn default() -> Self {
        ShopConfig {
            webhook_url: String::new(),
            shop_name: "Tech Mobile Store".to_string(),
            location: "Murang'a, Kenya".to_string(),
            inquiry_contact_number: "+254712345678".to_string(),
            whatsapp_group_link: "https://chat.whatsapp.com/your-group-link".to_string(),
            order_form_url: None,
        }
    }
}

impl ShopConfig {
    /// True when a webhook URL has been entered.
    pub fn is_webhook_configured(&self) -> bool {
        !is_blank(&self.webhook_url)
    }

    /// The webhook URL with surrounding whitespace removed.
    pub fn webhook_url(&self) -> &str {
        self.webhook_url.trim()
    }

    /// Validates the record before it is saved.
    ///
    /// ## Rules
    /// - `webhookUrl` may be empty; otherwise it must be an http(s) URL
    /// - `whatsappGroupLink` and `orderFormUrl` likewise, when present
    /// - `inquiryContactNumber`, when present, must look like a phone number
    pub fn validate(&self) -> ValidationResult<()> {
        if self.is_webhook_configured() {
            validate_http_url("webhookUrl", &self.webhook_url)?;
        }

        if !is_blank(&self.whatsapp_group_link) {
            validate_http_url("whatsappGroupLink", &self.whatsapp_group_link)?;
        }

        if let Some(order_form_url) = &self.order_form_url {
            if !is_blank(order_form_url) {
                validate_http_url("orderFormUrl", order_form_url)?;
            }
        }

        if !is_blank(&self.inquiry_contact_number) {
            validate_phone("inquiryContactNumber", &self.inquiry_contact_number)?;
        }

        Ok(())
    }
}
