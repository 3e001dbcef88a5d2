//! # Key-Value Repository
//!
//! SQL for the `kv_store` table.
//!
//! ```text
//! kv_store
//! ┌──────────────┬──────────────────────────────┬──────────────────────────┐
//! │ key (PK)     │ value (JSON text)            │ updated_at (RFC 3339)    │
//! ├──────────────┼──────────────────────────────┼──────────────────────────┤
//! │ n8n-config   │ {"webhookUrl": "...", ...}   │ 2026-03-01T09:30:00Z     │
//! │ auth-session │ {"isAuthenticated": true,...}│ 2026-03-01T09:31:12Z     │
//! └──────────────┴──────────────────────────────┴──────────────────────────┘
//! ```
//! Writes are single-row upserts, so each record is replaced atomically.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::kv::StoredValue;

#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    pub async fn get(&self, key: &str) -> DbResult<Option<StoredValue>> {
        let row = sqlx::query_as::<_, StoredValue>("SELECT key, value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Inserts or replaces the value under `key`.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "kv set");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes `key`. Returns whether a row existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "kv delete");

        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Keys starting with `prefix`, sorted. An empty prefix lists every key.
    ///
    /// Compared with `substr` rather than `LIKE` so `%` and `_` in a prefix
    /// are literal.
    pub async fn list(&self, prefix: &str) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>(
            r#"
            SELECT key FROM kv_store
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }
}
