//! Test doubles shared by the command and state tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use url::Url;

use shopdesk_core::{SessionUser, ShopConfig, WebhookRequest};
use shopdesk_db::{DbError, DbResult, KeyValueStore, MemoryStore, StoredValue, CONFIG_KEY};
use shopdesk_webhook::{WebhookError, WebhookReply, WebhookResult, WebhookTransport};

use crate::state::AppContext;

pub(crate) const TEST_WEBHOOK_URL: &str = "https://n8n.example.com/webhook/shop";

enum Outcome {
    Reply(WebhookReply),
    Fail(String),
}

/// Answers every request the same way and remembers what was sent.
pub(crate) struct RecordingTransport {
    outcome: Outcome,
    requests: Mutex<Vec<WebhookRequest>>,
}

impl RecordingTransport {
    /// 200 with an empty JSON object.
    pub(crate) fn new() -> Self {
        Self::replying(200, "{}")
    }

    pub(crate) fn replying(status: u16, body: &str) -> Self {
        RecordingTransport {
            outcome: Outcome::Reply(WebhookReply::new(status, body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request as if the host were unreachable.
    pub(crate) fn failing(message: &str) -> Self {
        RecordingTransport {
            outcome: Outcome::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<WebhookRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn post(&self, _url: &Url, request: &WebhookRequest) -> WebhookResult<WebhookReply> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Outcome::Reply(reply) => Ok(reply.clone()),
            Outcome::Fail(message) => Err(WebhookError::Transport(message.clone())),
        }
    }
}

/// Holds every request until [`GatedTransport::open`] is called.
pub(crate) struct GatedTransport {
    gate: Semaphore,
}

impl GatedTransport {
    pub(crate) fn new() -> Self {
        GatedTransport {
            gate: Semaphore::new(0),
        }
    }

    pub(crate) fn open(&self) {
        self.gate.add_permits(1024);
    }
}

#[async_trait]
impl WebhookTransport for GatedTransport {
    async fn post(&self, _url: &Url, _request: &WebhookRequest) -> WebhookResult<WebhookReply> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| WebhookError::Transport(e.to_string()))?;
        Ok(WebhookReply::new(200, "{}"))
    }
}

/// A store whose every call fails.
pub(crate) struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> DbResult<Option<StoredValue>> {
        Err(DbError::Internal("disk unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
        Err(DbError::Internal("disk unavailable".to_string()))
    }

    async fn delete(&self, _key: &str) -> DbResult<bool> {
        Err(DbError::Internal("disk unavailable".to_string()))
    }

    async fn list(&self, _prefix: &str) -> DbResult<Vec<String>> {
        Err(DbError::Internal("disk unavailable".to_string()))
    }
}

/// Reads from a memory store seeded like [`configured_context`]; every write
/// fails.
pub(crate) struct WriteFailingStore {
    inner: MemoryStore,
}

impl WriteFailingStore {
    pub(crate) fn configured() -> Self {
        WriteFailingStore {
            inner: MemoryStore::with_entries([(CONFIG_KEY, configured_json())]),
        }
    }
}

#[async_trait]
impl KeyValueStore for WriteFailingStore {
    async fn get(&self, key: &str) -> DbResult<Option<StoredValue>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
        Err(DbError::QueryFailed("database is locked".to_string()))
    }

    async fn delete(&self, _key: &str) -> DbResult<bool> {
        Err(DbError::QueryFailed("database is locked".to_string()))
    }

    async fn list(&self, prefix: &str) -> DbResult<Vec<String>> {
        self.inner.list(prefix).await
    }
}

fn configured_json() -> String {
    let config = ShopConfig {
        webhook_url: TEST_WEBHOOK_URL.to_string(),
        ..ShopConfig::default()
    };
    serde_json::to_string(&config).unwrap()
}

/// Context over a memory store whose saved settings point at
/// [`TEST_WEBHOOK_URL`]. Logged out.
pub(crate) async fn configured_context(transport: Arc<dyn WebhookTransport>) -> AppContext {
    let store = MemoryStore::with_entries([(CONFIG_KEY, configured_json())]);
    AppContext::load(Arc::new(store), transport).await
}

/// Same as [`configured_context`], with a staff member logged in.
pub(crate) async fn logged_in_context(transport: Arc<dyn WebhookTransport>) -> AppContext {
    let ctx = configured_context(transport).await;
    ctx.establish_session(SessionUser::new("u-1", "kim@shop.co.ke").with_full_name("Kim"))
        .await
        .unwrap();
    ctx
}
