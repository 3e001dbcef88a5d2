//! New-sale form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WebhookForm;
use crate::config::ShopConfig;
use crate::error::ValidationError;
use crate::money::Money;
use crate::protocol::{PaymentMethod, SalePayload, SaleResponse, SaleShop, WebhookRequest};
use crate::validation::{is_blank, validate_phone, ValidationResult};

/// A phone sale to a walk-in customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleForm {
    pub customer_name: String,
    pub phone_number: String,
    pub phone_bought: String,
    /// Amount as typed, e.g. "50000" or "49.99".
    pub amount: String,
    pub payment_method: PaymentMethod,
    pub sales_person: String,
}

impl SaleForm {
    fn parsed_amount(&self) -> ValidationResult<Money> {
        Money::parse_positive("amount", &self.amount)
    }
}

impl WebhookForm for SaleForm {
    type Response = SaleResponse;

    const NAME: &'static str = "sale";

    fn validate(&self) -> ValidationResult<()> {
        let required = [
            &self.customer_name,
            &self.phone_number,
            &self.phone_bought,
            &self.amount,
            &self.sales_person,
        ];
        if required.iter().any(|value| is_blank(value)) {
            return Err(ValidationError::Incomplete(
                "Please fill in all required fields".to_string(),
            ));
        }

        validate_phone("phoneNumber", &self.phone_number)?;
        self.parsed_amount()?;
        Ok(())
    }

    fn to_request(&self, config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.validate()?;

        Ok(WebhookRequest::NewSale {
            timestamp: now,
            sale: SalePayload {
                customer_name: self.customer_name.trim().to_string(),
                phone_number: self.phone_number.trim().to_string(),
                phone_bought: self.phone_bought.trim().to_string(),
                amount: self.parsed_amount()?.to_major_units(),
                payment_method: self.payment_method,
                sales_person: self.sales_person.trim().to_string(),
            },
            shop: SaleShop::from(config),
        })
    }

    fn interpret(&self, response: &SaleResponse) -> Result<String, String> {
        let mut message = String::from("Sale recorded!");
        if let Some(receipt) = &response.receipt_number {
            message.push_str(&format!(" Receipt #{receipt}"));
        }
        message.push('\n');
        message.push_str(response.message().unwrap_or(
            "Customer will receive WhatsApp message shortly.\nInventory automatically updated!",
        ));
        Ok(message)
    }

    fn failure_message(&self) -> &'static str {
        "Failed to record sale. Please check your webhook."
    }
}
