//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                                                                │
//! │       │   ctx.config_store().save(&config)                              │
//! │       ▼                                                                 │
//! │  ConfigStore / SessionStore   ← one fixed key each, JSON records        │
//! │       │   store.set("n8n-config", json)                                 │
//! │       ▼                                                                 │
//! │  dyn KeyValueStore                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvRepository (SQL)  or  MemoryStore                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvRepository`](kv::KvRepository) - SQL for the `kv_store` table
//! - [`ConfigStore`](config::ConfigStore) - Shop configuration record
//! - [`SessionStore`](session::SessionStore) - Login session record

pub mod config;
pub mod kv;
pub mod session;
