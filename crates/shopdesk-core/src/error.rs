//! # Error Types
//!
//! Domain-specific error types for shopdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopdesk-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures (shown inline)             │
//! │                                                                         │
//! │  shopdesk-db errors                                                    │
//! │  └── DbError          - Key-value storage failures                     │
//! │                                                                         │
//! │  shopdesk-webhook errors                                               │
//! │  └── WebhookError     - Transport / HTTP status failures               │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → Db/WebhookError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored session record does not describe a logged-in user.
    ///
    /// ## When This Occurs
    /// - `isAuthenticated` is false
    /// - `isAuthenticated` is true but `user` is missing
    #[error("Invalid session record: {0}")]
    InvalidSession(String),

    /// A record could not be encoded or decoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are reported inline, before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A form is missing one or more of its required fields.
    ///
    /// Carries the form-level message shown to staff, e.g.
    /// "Please fill in all required fields".
    #[error("{0}")]
    Incomplete(String),

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid URL, invalid number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Password failed the local strength gate.
    #[error("{0}")]
    WeakPassword(String),
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
