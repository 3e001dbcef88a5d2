//! # shopdesk-webhook: Outbound Webhook Client
//!
//! Every staff action ends as one JSON POST to the shop's n8n webhook. This
//! crate owns that call and nothing else.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/shopdesk  FormController::submit                                 │
//! │       │   send::<SaleResponse>(transport, url, &request)               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               shopdesk-webhook (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │  parse_webhook_url ─► WebhookTransport::post ─► status check   │   │
//! │  │                          │                         │            │   │
//! │  │               HttpWebhookClient (reqwest)   decode_response     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  n8n workflow (external: sales ledger, WhatsApp, inventory)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - Transport trait, reqwest client, typed send
//! - [`error`] - Failure categories

pub mod client;
pub mod error;

pub use client::{
    decode_response, parse_webhook_url, send, HttpWebhookClient, WebhookReply, WebhookTransport,
};
pub use error::{WebhookError, WebhookResult};
