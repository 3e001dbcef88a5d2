//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ──► VALIDATION_ERROR  "Please fill in all ..."        │
//! │  WebhookError::NotConfigured ──► NOT_CONFIGURED "Please configure..."  │
//! │  WebhookError::Transport ────► NETWORK_ERROR   "Error: <details>"      │
//! │  WebhookError::Status ───────► WEBHOOK_ERROR   form failure text       │
//! │  DbError ────────────────────► STORAGE_ERROR   generic text, logged    │
//! │  no session ─────────────────► UNAUTHENTICATED "Please log in first"   │
//! │  second submit ──────────────► BUSY                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopdesk_core::{CoreError, ValidationError};
use shopdesk_db::DbError;
use shopdesk_webhook::WebhookError;

/// Shown whenever an action needs the webhook but none is set.
pub const CONFIGURE_WEBHOOK_MESSAGE: &str = "Please configure the webhook URL in Settings";

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_CONFIGURED",
///   "message": "Please configure the webhook URL in Settings"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Local form check failed. Nothing was sent.
    ValidationError,

    /// Webhook URL missing or unusable.
    NotConfigured,

    /// The webhook could not be reached.
    NetworkError,

    /// The webhook answered, but not with success.
    WebhookError,

    /// Action needs a logged-in user.
    Unauthenticated,

    /// Local storage failed.
    StorageError,

    /// A submission of the same form is still running.
    Busy,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_configured() -> Self {
        ApiError::new(ErrorCode::NotConfigured, CONFIGURE_WEBHOOK_MESSAGE)
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Please log in first")
    }

    pub fn busy() -> Self {
        ApiError::new(ErrorCode::Busy, "A submission is already in progress")
    }

    /// A non-2xx reply, or a rejection carried inside a 2xx reply.
    pub fn webhook(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::WebhookError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::InvalidSession(e) => {
                tracing::warn!("Invalid session: {}", e);
                ApiError::unauthenticated()
            }
            CoreError::Serialization(e) => ApiError::internal(format!("Error: {e}")),
        }
    }
}

/// Converts storage errors. Details are logged, not shown.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!("Storage failure: {}", err);
        let message = match err {
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => "Local storage is unavailable",
            DbError::MigrationFailed(_) => "Local storage could not be upgraded",
            DbError::QueryFailed(_) | DbError::Internal(_) | DbError::Serialization(_) => {
                "Could not save to local storage"
            }
        };
        ApiError::new(ErrorCode::StorageError, message)
    }
}

/// Generic mapping. Form submissions replace the `Status` text with the
/// form's own failure message.
impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::NotConfigured => ApiError::not_configured(),
            WebhookError::InvalidUrl(_) => ApiError::new(ErrorCode::NotConfigured, err.to_string()),
            WebhookError::Transport(e) => ApiError::new(ErrorCode::NetworkError, format!("Error: {e}")),
            WebhookError::Status { .. } => ApiError::webhook(err.to_string()),
            WebhookError::InvalidResponse(_) => ApiError::webhook(format!("Error: {err}")),
            WebhookError::Serialization(e) => ApiError::internal(format!("Error: {e}")),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
