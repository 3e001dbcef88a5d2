//! # Authentication Session
//!
//! Whether this process believes a staff member is logged in.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────────────┐   establish(user)   ┌──────────────────────┐     │
//! │   │ Unauthenticated │ ──────────────────► │ Authenticated(user)  │     │
//! │   │                 │ ◄────────────────── │                      │     │
//! │   └─────────────────┘       clear()       └──────────────────────┘     │
//! │                                                                         │
//! │   No refresh, no expiry. A missing record, a record with               │
//! │   isAuthenticated=false, or an unreadable record all mean              │
//! │   Unauthenticated.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Shapes
//! - [`SessionRecord`] is what sits in storage. Every field is optional so
//!   that damaged or foreign records still decode.
//! - [`AuthSession`] is the validated in-memory form. It always carries a
//!   user, so "authenticated without a user" cannot be represented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::serde_ext::string_or_number;

// =============================================================================
// Session User
// =============================================================================

/// The staff user returned by the webhook on login.
///
/// Only `id` is required. Any extra fields the workflow sends are kept
/// verbatim so they survive a save/restore cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "userId", alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Creates a user with an id and email.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        SessionUser {
            id: id.into(),
            email: Some(email.into()),
            full_name: None,
            extra: Map::new(),
        }
    }

    /// Sets the display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Name to greet the user with: full name, then email, then id.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or(&self.id)
    }
}

// =============================================================================
// Stored Record
// =============================================================================

/// The session record as persisted under the session key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
    pub established_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Auth Session
// =============================================================================

/// A validated, logged-in session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: SessionUser,

    /// When the session was established.
    /// `None` only for records written before the timestamp was stored.
    pub established_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Creates a session established at the given instant.
    pub fn new(user: SessionUser, established_at: DateTime<Utc>) -> Self {
        AuthSession {
            user,
            established_at: Some(established_at),
        }
    }

    /// Converts to the persisted shape.
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            is_authenticated: true,
            user: Some(self.user.clone()),
            established_at: self.established_at,
        }
    }
}

impl TryFrom<SessionRecord> for AuthSession {
    type Error = CoreError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if !record.is_authenticated {
            return Err(CoreError::InvalidSession(
                "isAuthenticated is false".to_string(),
            ));
        }

        let user = record
            .user
            .ok_or_else(|| CoreError::InvalidSession("user is missing".to_string()))?;

        Ok(AuthSession {
            user,
            established_at: record.established_at,
        })
    }
}

// =============================================================================
// Session State
// =============================================================================

/// The two states of the login state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(AuthSession),
}

impl SessionState {
    /// True when a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::Authenticated(session) => Some(&session.user),
            SessionState::Unauthenticated => None,
        }
    }

    /// Interprets raw stored JSON. Anything unreadable is `Unauthenticated`.
    pub fn from_stored_json(json: &str) -> Self {
        serde_json::from_str::<SessionRecord>(json)
            .map_err(CoreError::from)
            .and_then(AuthSession::try_from)
            .map(SessionState::Authenticated)
            .unwrap_or_default()
    }
}
