//! # Commands Module
//!
//! Everything the shell can ask the application to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (login gate)
//! ├── config.rs    ◄─── Show / save settings
//! ├── auth.rs      ◄─── Signup, login, logout, whoami, password check
//! ├── sale.rs      ◄─── new_sale
//! ├── inventory.rs ◄─── inventory_added
//! ├── offer.rs     ◄─── broadcast_offer + image attachments
//! └── customer.rs  ◄─── search_customer
//! ```
//!
//! Settings and auth commands work logged out. Every other form submission
//! goes through [`require_login`] first.

pub mod auth;
pub mod config;
pub mod customer;
pub mod inventory;
pub mod offer;
pub mod sale;

use tracing::debug;

use shopdesk_core::{SessionUser, WebhookForm};

use crate::error::ApiError;
use crate::state::{AppContext, FormController, Submission};

/// The logged-in user, or `UNAUTHENTICATED`.
pub async fn require_login(ctx: &AppContext) -> Result<SessionUser, ApiError> {
    ctx.current_user().await.ok_or_else(ApiError::unauthenticated)
}

/// Submits a form that only logged-in staff may send.
pub(crate) async fn submit_as_staff<F: WebhookForm>(
    ctx: &AppContext,
    controller: &FormController<F>,
) -> Result<Submission<F::Response>, ApiError> {
    let user = require_login(ctx).await?;
    debug!(form = F::NAME, user_id = %user.id, "Staff submission");
    controller.submit(ctx).await
}
