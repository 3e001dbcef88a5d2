//! # Webhook Protocol
//!
//! JSON shapes exchanged with the n8n workflow.
//!
//! ## Request Envelope
//! Every request is one JSON object POSTed to the configured URL. The
//! `action` field tells the workflow's Switch node which branch to run:
//!
//! ```text
//! ┌──────────────────┬─────────────────────────────────────────────────────┐
//! │ action           │ body (besides action + timestamp)                   │
//! ├──────────────────┼─────────────────────────────────────────────────────┤
//! │ new_sale         │ sale{…}, shop{name, location, inquiryNumber,        │
//! │                  │           whatsappGroup}                            │
//! │ inventory_added  │ actionType, data{…}, shop{name, location}           │
//! │ broadcast_offer  │ offer{…, images[]}, shop{name, location,            │
//! │                  │           inquiryNumber}                            │
//! │ search_customer  │ search{query, type}                                 │
//! │ signup_request   │ user{email, passwordHash, fullName, phoneNumber}    │
//! │ login_request    │ user{email, passwordHash}                           │
//! └──────────────────┴─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Responses
//! Each action has its own response type. Every field is optional: the
//! workflow may return any subset, or an empty body.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::config::ShopConfig;
use crate::serde_ext::opt_string_or_number;
use crate::session::SessionUser;

// =============================================================================
// Enumerations
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Mpesa,
    Bank,
    Installment,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Mpesa,
        PaymentMethod::Bank,
        PaymentMethod::Installment,
    ];

    /// Label shown in the payment dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Mpesa => "M-Pesa",
            PaymentMethod::Bank => "Bank Transfer",
            PaymentMethod::Installment => "Installment",
        }
    }
}

/// The three inventory operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InventoryAction {
    /// New phones arrived for an existing product.
    #[default]
    AddStock,
    /// Units sold outside the full sale flow.
    Sale,
    /// A model not yet in the catalog.
    NewProduct,
}

/// Kind of promotion being broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum DealType {
    #[default]
    NewArrival,
    Discount,
    Featured,
    FlashSale,
}

impl DealType {
    pub fn label(&self) -> &'static str {
        match self {
            DealType::NewArrival => "New Arrival",
            DealType::Discount => "Special Discount",
            DealType::Featured => "Featured Deal",
            DealType::FlashSale => "Flash Sale",
        }
    }
}

/// Which customer field a search matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SearchType {
    #[default]
    All,
    Name,
    Phone,
}

// =============================================================================
// Request Payloads
// =============================================================================

/// `sale` object of a `new_sale` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub customer_name: String,
    pub phone_number: String,
    pub phone_bought: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub sales_person: String,
}

/// `data` object of an `inventory_added` request. Absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub minimum_stock: i64,
}

/// One attached image, as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OfferImage {
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// `offer` object of a `broadcast_offer` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPayload {
    pub phone_model: String,
    pub price: f64,
    pub features: String,
    pub deal_type: DealType,
    pub images: Vec<OfferImage>,
}

/// `search` object of a `search_customer` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPayload {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
}

/// `user` object of signup/login requests. Carries the digest, never the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Shop block sent with sales. Field names follow the workflow, not [`ShopConfig`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleShop {
    pub name: String,
    pub location: String,
    pub inquiry_number: String,
    pub whatsapp_group: String,
}

impl From<&ShopConfig> for SaleShop {
    fn from(config: &ShopConfig) -> Self {
        SaleShop {
            name: config.shop_name.clone(),
            location: config.location.clone(),
            inquiry_number: config.inquiry_contact_number.clone(),
            whatsapp_group: config.whatsapp_group_link.clone(),
        }
    }
}

/// Shop block sent with inventory updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryShop {
    pub name: String,
    pub location: String,
}

impl From<&ShopConfig> for InventoryShop {
    fn from(config: &ShopConfig) -> Self {
        InventoryShop {
            name: config.shop_name.clone(),
            location: config.location.clone(),
        }
    }
}

/// Shop block sent with offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferShop {
    pub name: String,
    pub location: String,
    pub inquiry_number: String,
}

impl From<&ShopConfig> for OfferShop {
    fn from(config: &ShopConfig) -> Self {
        OfferShop {
            name: config.shop_name.clone(),
            location: config.location.clone(),
            inquiry_number: config.inquiry_contact_number.clone(),
        }
    }
}

// =============================================================================
// Request Envelope
// =============================================================================

/// ISO 8601 UTC with milliseconds, e.g. `2026-03-01T09:30:00.000Z`.
fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A complete request body, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebhookRequest {
    NewSale {
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        sale: SalePayload,
        shop: SaleShop,
    },
    InventoryAdded {
        #[serde(rename = "actionType")]
        action_type: InventoryAction,
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        data: InventoryPayload,
        shop: InventoryShop,
    },
    BroadcastOffer {
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        offer: OfferPayload,
        shop: OfferShop,
    },
    SearchCustomer {
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        search: SearchPayload,
    },
    SignupRequest {
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        user: UserPayload,
    },
    LoginRequest {
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
        user: UserPayload,
    },
}

impl WebhookRequest {
    /// The `action` discriminator, for logging.
    pub fn action(&self) -> &'static str {
        match self {
            WebhookRequest::NewSale { .. } => "new_sale",
            WebhookRequest::InventoryAdded { .. } => "inventory_added",
            WebhookRequest::BroadcastOffer { .. } => "broadcast_offer",
            WebhookRequest::SearchCustomer { .. } => "search_customer",
            WebhookRequest::SignupRequest { .. } => "signup_request",
            WebhookRequest::LoginRequest { .. } => "login_request",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WebhookRequest::NewSale { timestamp, .. }
            | WebhookRequest::InventoryAdded { timestamp, .. }
            | WebhookRequest::BroadcastOffer { timestamp, .. }
            | WebhookRequest::SearchCustomer { timestamp, .. }
            | WebhookRequest::SignupRequest { timestamp, .. }
            | WebhookRequest::LoginRequest { timestamp, .. } => *timestamp,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

fn non_empty(message: &Option<String>) -> Option<&str> {
    message.as_deref().map(str::trim).filter(|m| !m.is_empty())
}

/// Response to `new_sale`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleResponse {
    #[serde(deserialize_with = "opt_string_or_number")]
    pub receipt_number: Option<String>,
    pub message: Option<String>,
}

impl SaleResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}

/// Response to `inventory_added`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryResponse {
    pub message: Option<String>,
    pub low_stock_alert: Option<bool>,
}

impl InventoryResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }

    pub fn is_low_stock(&self) -> bool {
        self.low_stock_alert.unwrap_or(false)
    }
}

/// Response to `broadcast_offer`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OfferResponse {
    pub message: Option<String>,
}

impl OfferResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}

/// One customer returned by `search_customer`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerRecord {
    #[serde(alias = "customerName")]
    pub name: Option<String>,
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
    pub phone_bought: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomerRecord {
    /// One-line description: `Jane Doe (+2547…) - iPhone 13`.
    pub fn summary(&self) -> String {
        let mut line = self
            .name
            .clone()
            .unwrap_or_else(|| "Unknown customer".to_string());
        if let Some(phone) = &self.phone_number {
            line.push_str(&format!(" ({phone})"));
        }
        if let Some(bought) = &self.phone_bought {
            line.push_str(&format!(" - {bought}"));
        }
        line
    }
}

/// Response to `search_customer`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CustomerSearchResponse {
    pub customers: Vec<CustomerRecord>,
    pub message: Option<String>,
}

impl CustomerSearchResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}

/// Response to `signup_request` and `login_request`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    pub success: Option<bool>,
    pub user: Option<SessionUser>,
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}
