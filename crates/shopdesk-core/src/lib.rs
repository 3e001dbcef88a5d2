//! # shopdesk-core: Pure Rules for ShopDesk
//!
//! This crate holds every rule of the shop client that can be expressed
//! without I/O: the persisted record shapes, credential preparation, form
//! validation and the webhook wire protocol.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopDesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Commands (apps/shopdesk)                     │   │
//! │  │    save_settings, login, submit_sale, broadcast_offer, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  config   │  │credential │  │   forms   │  │ protocol  │  │   │
//! │  │   │ShopConfig │  │  digest   │  │ SaleForm  │  │ Webhook   │  │   │
//! │  │   │  session  │  │  scoring  │  │ OfferForm │  │ Request   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                  │                                  │                   │
//! │  ┌───────────────▼──────────────┐  ┌────────────────▼───────────────┐  │
//! │  │  shopdesk-db (KV storage)    │  │  shopdesk-webhook (HTTP POST)  │  │
//! │  └──────────────────────────────┘  └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Shop configuration record and its defaults
//! - [`session`] - Authentication session record and state machine
//! - [`credential`] - Password digest, strength scoring, email normalization
//! - [`forms`] - Staff forms and their local validation
//! - [`protocol`] - Webhook request and response shapes
//! - [`money`] - Integer money parsed from form input
//! - [`validation`] - Field validators shared by the forms
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopdesk_core::credential::{digest, score_strength, StrengthTier};
//!
//! let report = score_strength("Abcdef12!");
//! assert_eq!(report.tier, StrengthTier::Strong);
//!
//! let hash = digest("Abcdef12!");
//! assert_eq!(hash.len(), 64);
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod forms;
pub mod money;
pub mod protocol;
pub mod session;
pub mod validation;

mod serde_ext;

pub use config::ShopConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use forms::WebhookForm;
pub use money::Money;
pub use protocol::WebhookRequest;
pub use session::{AuthSession, SessionState, SessionUser};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum stock level sent with inventory updates when the form leaves it blank.
pub const DEFAULT_MINIMUM_STOCK: i64 = 5;

/// Largest quantity accepted in a single inventory update.
///
/// ## Business Reason
/// Catches typos such as 10000 instead of 100 before they reach the workflow.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Maximum length of a customer search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
