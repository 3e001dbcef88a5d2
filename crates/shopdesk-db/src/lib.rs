//! # shopdesk-db: Local Storage for ShopDesk
//!
//! ShopDesk keeps exactly two records on the device: the shop configuration
//! and the current login. Both live in one key-value table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopDesk Data Flow                               │
//! │                                                                         │
//! │  Command (save_settings / login / logout)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopdesk-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  ConfigStore  │    │ SessionStore  │    │  Migrations  │  │   │
//! │  │   │  "n8n-config" │    │"auth-session" │    │  (embedded)  │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           └─────────┬──────────┘                               │   │
//! │  │                     ▼                                          │   │
//! │  │        dyn KeyValueStore  (get / set / delete / list)          │   │
//! │  │           │                         │                          │   │
//! │  │   ┌───────▼───────┐         ┌───────▼───────┐                 │   │
//! │  │   │   Database    │         │  MemoryStore  │                 │   │
//! │  │   │ SQLite + WAL  │         │  BTreeMap     │                 │   │
//! │  │   └───────────────┘         └───────────────┘                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./shopdesk.db")).await?;
//! let store: Arc<dyn KeyValueStore> = Arc::new(db);
//!
//! let config = ConfigStore::new(store.clone()).load().await;
//! let session = SessionStore::new(store).restore().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::{KeyValueStore, MemoryStore, StoredValue};
pub use pool::{Database, DbConfig};

pub use repository::config::{ConfigStore, CONFIG_KEY};
pub use repository::kv::KvRepository;
pub use repository::session::{SessionStore, SESSION_KEY};
