//! # Staff Forms
//!
//! Each form is a plain struct of the values staff typed, validated locally
//! and turned into a [`WebhookRequest`].
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  form.validate()            ── missing field? → inline error, stop     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  config.is_webhook_configured() ── no? → "configure webhook", stop     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.to_request(config, now)  → WebhookRequest                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST (shopdesk-webhook)    ── non-2xx → form.failure_message()        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.interpret(response)   → Ok(success text) / Err(rejection text)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Steps two and four happen in the application; this module only supplies
//! the pure pieces.

mod auth;
mod customer;
mod inventory;
mod offer;
mod sale;

pub use auth::{LoginForm, SignupForm};
pub use customer::CustomerSearchForm;
pub use inventory::InventoryForm;
pub use offer::OfferForm;
pub use sale::SaleForm;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::config::ShopConfig;
use crate::protocol::WebhookRequest;
use crate::validation::ValidationResult;

/// A form whose submission is one webhook request.
pub trait WebhookForm: Default + Clone + Send + Sync {
    /// Typed response body for this form's action.
    type Response: DeserializeOwned + Default + Send;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Local checks run before anything else.
    fn validate(&self) -> ValidationResult<()>;

    /// Builds the request body.
    fn to_request(&self, config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest>;

    /// Reads a 2xx response.
    ///
    /// `Err` carries a rejection the workflow reported inside a successful
    /// HTTP response (for example a login with `success: false`).
    fn interpret(&self, response: &Self::Response) -> Result<String, String>;

    /// Fixed text shown when the webhook answers with a non-2xx status.
    fn failure_message(&self) -> &'static str;
}
