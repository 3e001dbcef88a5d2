//! Inventory form: add stock, record a stock sale, or add a new product.
//!
//! ## Required Fields Per Action
//! ```text
//! add_stock / sale  →  productId, quantity
//! new_product       →  brand, model, quantity, price
//! minimumStock      →  optional everywhere, defaults to 5
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WebhookForm;
use crate::config::ShopConfig;
use crate::error::ValidationError;
use crate::money::Money;
use crate::protocol::{
    InventoryAction, InventoryPayload, InventoryResponse, InventoryShop, WebhookRequest,
};
use crate::validation::{is_blank, non_blank, parse_minimum_stock, parse_quantity, ValidationResult};
use crate::DEFAULT_MINIMUM_STOCK;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryForm {
    pub action: InventoryAction,
    pub product_id: String,
    pub brand: String,
    pub model: String,
    pub quantity: String,
    pub price: String,
    pub minimum_stock: String,
}

impl Default for InventoryForm {
    fn default() -> Self {
        InventoryForm {
            action: InventoryAction::AddStock,
            product_id: String::new(),
            brand: String::new(),
            model: String::new(),
            quantity: String::new(),
            price: String::new(),
            minimum_stock: DEFAULT_MINIMUM_STOCK.to_string(),
        }
    }
}

impl InventoryForm {
    /// A blank form preset to the given action.
    pub fn for_action(action: InventoryAction) -> Self {
        InventoryForm {
            action,
            ..InventoryForm::default()
        }
    }

    fn parsed_price(&self) -> ValidationResult<Option<Money>> {
        if is_blank(&self.price) {
            Ok(None)
        } else {
            Money::parse_positive("price", &self.price).map(Some)
        }
    }
}

impl WebhookForm for InventoryForm {
    type Response = InventoryResponse;

    const NAME: &'static str = "inventory";

    fn validate(&self) -> ValidationResult<()> {
        match self.action {
            InventoryAction::NewProduct => {
                let required = [&self.model, &self.brand, &self.quantity, &self.price];
                if required.iter().any(|value| is_blank(value)) {
                    return Err(ValidationError::Incomplete(
                        "Please fill in all fields for new product".to_string(),
                    ));
                }
            }
            InventoryAction::AddStock | InventoryAction::Sale => {
                if is_blank(&self.product_id) || is_blank(&self.quantity) {
                    return Err(ValidationError::Incomplete(
                        "Please select product and enter quantity".to_string(),
                    ));
                }
            }
        }

        parse_quantity(&self.quantity)?;
        self.parsed_price()?;
        parse_minimum_stock(&self.minimum_stock)?;
        Ok(())
    }

    fn to_request(&self, config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.validate()?;

        Ok(WebhookRequest::InventoryAdded {
            action_type: self.action,
            timestamp: now,
            data: InventoryPayload {
                product_id: non_blank(&self.product_id),
                brand: non_blank(&self.brand),
                model: non_blank(&self.model),
                quantity: parse_quantity(&self.quantity)?,
                price: self.parsed_price()?.map(|p| p.to_major_units()),
                minimum_stock: parse_minimum_stock(&self.minimum_stock)?,
            },
            shop: InventoryShop::from(config),
        })
    }

    fn interpret(&self, response: &InventoryResponse) -> Result<String, String> {
        let quantity = self.quantity.trim();

        let mut message = match self.action {
            InventoryAction::AddStock => format!(
                "Stock added successfully!\n{}",
                response
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{quantity} units added to inventory."))
            ),
            InventoryAction::Sale => format!(
                "Sale recorded!\n{}",
                response
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Stock reduced by {quantity} units."))
            ),
            InventoryAction::NewProduct => format!(
                "New product added!\n{}",
                response.message().map(str::to_string).unwrap_or_else(|| format!(
                    "{} {} added to inventory.",
                    self.brand.trim(),
                    self.model.trim()
                ))
            ),
        };

        if response.is_low_stock() {
            message.push_str("\nLOW STOCK ALERT: Current stock is below minimum!");
        }

        Ok(message)
    }

    fn failure_message(&self) -> &'static str {
        "Failed to update inventory. Please check your webhook."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restock() -> InventoryForm {
        InventoryForm {
            product_id: "IP13-128".to_string(),
            quantity: "10".to_string(),
            ..InventoryForm::default()
        }
    }

    fn new_product() -> InventoryForm {
        InventoryForm {
            brand: "Samsung".to_string(),
            model: "Galaxy A15".to_string(),
            quantity: "4".to_string(),
            price: "18999".to_string(),
            ..InventoryForm::for_action(InventoryAction::NewProduct)
        }
    }

    #[test]
    fn test_default_minimum_stock_is_five() {
        assert_eq!(InventoryForm::default().minimum_stock, "5");
    }

    #[test]
    fn test_stock_actions_need_product_and_quantity() {
        let form = InventoryForm {
            quantity: "3".to_string(),
            ..InventoryForm::for_action(InventoryAction::Sale)
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Incomplete(
                "Please select product and enter quantity".to_string()
            ))
        );
        assert!(restock().validate().is_ok());
    }

    #[test]
    fn test_new_product_needs_brand_model_quantity_price() {
        let mut form = new_product();
        form.price.clear();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Incomplete(
                "Please fill in all fields for new product".to_string()
            ))
        );
        assert!(new_product().validate().is_ok());
    }

    #[test]
    fn test_request_omits_blank_fields_and_defaults_minimum() {
        let mut form = restock();
        form.minimum_stock.clear();

        match form.to_request(&ShopConfig::default(), Utc::now()).unwrap() {
            WebhookRequest::InventoryAdded {
                action_type, data, ..
            } => {
                assert_eq!(action_type, InventoryAction::AddStock);
                assert_eq!(data.product_id.as_deref(), Some("IP13-128"));
                assert_eq!(data.brand, None);
                assert_eq!(data.price, None);
                assert_eq!(data.quantity, 10);
                assert_eq!(data.minimum_stock, DEFAULT_MINIMUM_STOCK);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_new_product_request_has_price() {
        match new_product()
            .to_request(&ShopConfig::default(), Utc::now())
            .unwrap()
        {
            WebhookRequest::InventoryAdded { data, .. } => {
                assert_eq!(data.price, Some(18999.0));
                assert_eq!(data.model.as_deref(), Some("Galaxy A15"));
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_interpret_fallbacks_and_low_stock() {
        let message = restock().interpret(&InventoryResponse::default()).unwrap();
        assert_eq!(message, "Stock added successfully!\n10 units added to inventory.");

        let sale = InventoryForm {
            action: InventoryAction::Sale,
            ..restock()
        };
        let message = sale
            .interpret(&InventoryResponse {
                message: None,
                low_stock_alert: Some(true),
            })
            .unwrap();
        assert!(message.contains("Stock reduced by 10 units."));
        assert!(message.ends_with("LOW STOCK ALERT: Current stock is below minimum!"));

        let message = new_product()
            .interpret(&InventoryResponse::default())
            .unwrap();
        assert!(message.contains("Samsung Galaxy A15 added to inventory."));
    }
}
