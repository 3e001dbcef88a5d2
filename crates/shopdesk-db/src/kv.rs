//! # Key-Value Store Seam
//!
//! [`KeyValueStore`] is what [`ConfigStore`](crate::ConfigStore) and
//! [`SessionStore`](crate::SessionStore) write through. Two implementations:
//!
//! | Type | Backing | Used by |
//! |------|---------|---------|
//! | [`Database`] | SQLite `kv_store` table | the app |
//! | [`MemoryStore`] | `BTreeMap` behind a tokio `RwLock` | tests, `SHOPDESK_IN_MEMORY=1` |

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::DbResult;
use crate::pool::Database;

/// One stored entry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredValue {
    pub key: String,
    /// JSON text.
    pub value: String,
}

/// Async string-keyed storage.
///
/// Each `set` replaces the whole value for its key atomically.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> DbResult<Option<StoredValue>>;

    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Returns `true` when the key existed.
    async fn delete(&self, key: &str) -> DbResult<bool>;

    /// Keys starting with `prefix`, in ascending order.
    async fn list(&self, prefix: &str) -> DbResult<Vec<String>>;
}

#[async_trait]
impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> DbResult<Option<StoredValue>> {
        self.kv().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.kv().set(key, value).await
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        self.kv().delete(key).await
    }

    async fn list(&self, prefix: &str) -> DbResult<Vec<String>> {
        self.kv().list(prefix).await
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local store. Contents vanish when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for seeding tests.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<StoredValue>> {
        Ok(self.entries.read().await.get(key).map(|value| StoredValue {
            key: key.to_string(),
            value: value.clone(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> DbResult<Vec<String>> {
        Ok(self
            .entries
            .read()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use std::sync::Arc;

    async fn exercise(store: Arc<dyn KeyValueStore>) {
        assert!(store.get("k").await.unwrap().is_none());

        store.set("k", "1").await.unwrap();
        store.set("k", "2").await.unwrap();
        store.set("other", "x").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().unwrap().value, "2");
        assert_eq!(store.list("").await.unwrap(), vec!["k", "other"]);
        assert_eq!(store.list("o").await.unwrap(), vec!["other"]);

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_contract() {
        exercise(Arc::new(MemoryStore::new())).await;
    }

    #[tokio::test]
    async fn test_database_store_contract() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        exercise(Arc::new(db)).await;
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.list("").await.unwrap(), vec!["a", "b"]);
    }
}
