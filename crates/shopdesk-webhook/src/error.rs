//! # Webhook Error Types
//!
//! ## Categories
//! ```text
//! ┌──────────────────┬───────────────────────────────┬────────────────────────┐
//! │ Variant          │ Cause                         │ Shown to staff as      │
//! ├──────────────────┼───────────────────────────────┼────────────────────────┤
//! │ NotConfigured    │ webhook URL blank             │ "configure webhook"    │
//! │ InvalidUrl       │ URL does not parse            │ "configure webhook"    │
//! │ Transport        │ DNS, refused, TLS, reset      │ "Error: <details>"     │
//! │ Status           │ non-2xx reply                 │ form's failure text    │
//! │ InvalidResponse  │ 2xx reply that is not JSON    │ "Error: <details>"     │
//! │ Serialization    │ request could not be encoded  │ "Error: <details>"     │
//! └──────────────────┴───────────────────────────────┴────────────────────────┘
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Webhook URL is not configured")]
    NotConfigured,

    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// The request never got an HTTP answer.
    #[error("{0}")]
    Transport(String),

    /// The webhook answered with a non-2xx status. The body is not read.
    #[error("Webhook returned HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid webhook response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        WebhookError::Transport(err.to_string())
    }
}

impl WebhookError {
    /// True for the two "fix your settings" cases.
    pub fn is_configuration(&self) -> bool {
        matches!(self, WebhookError::NotConfigured | WebhookError::InvalidUrl(_))
    }
}

pub type WebhookResult<T> = Result<T, WebhookError>;
