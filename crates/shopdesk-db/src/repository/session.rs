//! # Session Store
//!
//! Persists the login under [`SESSION_KEY`]. Restoring fails closed: only a
//! readable record with `isAuthenticated: true` and a user counts as logged in.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use shopdesk_core::{AuthSession, SessionState, SessionUser};

use crate::error::DbResult;
use crate::kv::KeyValueStore;

/// Storage key of the session record.
pub const SESSION_KEY: &str = "auth-session";

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        SessionStore { store }
    }

    pub async fn restore(&self) -> SessionState {
        match self.store.get(SESSION_KEY).await {
            Ok(Some(stored)) => {
                let state = SessionState::from_stored_json(&stored.value);
                match state.user() {
                    Some(user) => debug!(user_id = %user.id, "Restored session"),
                    None => warn!("Stored session is not valid, treating as logged out"),
                }
                state
            }
            Ok(None) => {
                debug!("No stored session");
                SessionState::Unauthenticated
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session, treating as logged out");
                SessionState::Unauthenticated
            }
        }
    }

    /// Records `user` as logged in as of now.
    pub async fn establish(&self, user: SessionUser) -> DbResult<AuthSession> {
        let session = AuthSession::new(user, Utc::now());
        let json = serde_json::to_string(&session.to_record())?;
        self.store.set(SESSION_KEY, &json).await?;

        info!(user_id = %session.user.id, "Session established");
        Ok(session)
    }

    /// Removes the record. Succeeds when nothing was stored.
    pub async fn clear(&self) -> DbResult<()> {
        let existed = self.store.delete(SESSION_KEY).await?;
        info!(existed, "Session cleared");
        Ok(())
    }
}
