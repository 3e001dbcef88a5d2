//! # Webhook Client
//!
//! ## Send Sequence
//! ```text
//! send::<R>(transport, "https://n8n.example.com/webhook/shop", &request)
//!   │
//!   ├─ 1. parse_webhook_url      blank → NotConfigured, bad → InvalidUrl
//!   ├─ 2. transport.post         no answer → Transport
//!   ├─ 3. status check           non-2xx → Status{status}
//!   └─ 4. decode_response::<R>   ""      → R::default()
//!                                 [obj]   → obj
//!                                 obj     → obj
//!                                 other   → InvalidResponse
//! ```
//! The transport is a trait so the app can be driven by a fake in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use shopdesk_core::WebhookRequest;

use crate::error::{WebhookError, WebhookResult};

/// Raw HTTP answer: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

impl WebhookReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        WebhookReply {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one request to the webhook.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, url: &Url, request: &WebhookRequest) -> WebhookResult<WebhookReply>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// `reqwest`-backed transport. Sends `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub struct HttpWebhookClient {
    client: Client,
}

impl HttpWebhookClient {
    pub fn new() -> WebhookResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("shopdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpWebhookClient { client })
    }

    /// Wraps an existing client, e.g. one with a proxy configured.
    pub fn with_client(client: Client) -> Self {
        HttpWebhookClient { client }
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookClient {
    async fn post(&self, url: &Url, request: &WebhookRequest) -> WebhookResult<WebhookReply> {
        let response = self.client.post(url.clone()).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(WebhookReply { status, body })
    }
}

// =============================================================================
// Typed Send
// =============================================================================

/// Parses the configured URL. Only absolute `http`/`https` URLs are accepted.
pub fn parse_webhook_url(raw: &str) -> WebhookResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WebhookError::NotConfigured);
    }

    let url = Url::parse(raw).map_err(|e| WebhookError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WebhookError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

/// Decodes a 2xx body.
///
/// An empty body means "no fields". n8n's "respond with all items" mode wraps
/// the object in an array; the first element is used.
pub fn decode_response<R>(body: &str) -> WebhookResult<R>
where
    R: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(R::default());
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| WebhookError::InvalidResponse(e.to_string()))?;

    let value = match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(R::default()),
        },
        other => other,
    };

    serde_json::from_value(value).map_err(|e| WebhookError::InvalidResponse(e.to_string()))
}

/// Sends `request` and decodes the reply as `R`. One attempt, no retry.
pub async fn send<R>(
    transport: &dyn WebhookTransport,
    webhook_url: &str,
    request: &WebhookRequest,
) -> WebhookResult<R>
where
    R: DeserializeOwned + Default,
{
    let url = parse_webhook_url(webhook_url)?;
    let action = request.action();

    debug!(action, host = url.host_str().unwrap_or_default(), "Posting to webhook");

    let reply = transport.post(&url, request).await.map_err(|e| {
        warn!(action, error = %e, "Webhook request failed");
        e
    })?;

    if !reply.is_success() {
        warn!(action, status = reply.status, "Webhook returned error status");
        return Err(WebhookError::Status {
            status: reply.status,
        });
    }

    info!(action, status = reply.status, "Webhook accepted request");
    decode_response(&reply.body)
}
