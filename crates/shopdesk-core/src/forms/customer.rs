use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WebhookForm;
use crate::config::ShopConfig;
use crate::error::ValidationError;
use crate::protocol::{CustomerSearchResponse, SearchPayload, SearchType, WebhookRequest};
use crate::validation::{is_blank, validate_search_query, ValidationResult};

/// Looks up past customers by name or phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerSearchForm {
    pub query: String,
    pub search_type: SearchType,
}

impl CustomerSearchForm {
    pub fn new(query: impl Into<String>, search_type: SearchType) -> Self {
        CustomerSearchForm {
            query: query.into(),
            search_type,
        }
    }
}

impl WebhookForm for CustomerSearchForm {
    type Response = CustomerSearchResponse;

    const NAME: &'static str = "customer_search";

    fn validate(&self) -> ValidationResult<()> {
        if is_blank(&self.query) {
            return Err(ValidationError::Incomplete(
                "Please enter a name or phone number to search".to_string(),
            ));
        }
        validate_search_query(&self.query)?;
        Ok(())
    }

    fn to_request(&self, _config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.validate()?;

        Ok(WebhookRequest::SearchCustomer {
            timestamp: now,
            search: SearchPayload {
                query: validate_search_query(&self.query)?,
                search_type: self.search_type,
            },
        })
    }

    fn interpret(&self, response: &CustomerSearchResponse) -> Result<String, String> {
        let mut message = format!("Found {} customer(s)", response.customers.len());
        for customer in &response.customers {
            message.push_str("\n- ");
            message.push_str(&customer.summary());
        }
        if let Some(note) = response.message() {
            message.push('\n');
            message.push_str(note);
        }
        Ok(message)
    }

    fn failure_message(&self) -> &'static str {
        "Failed to search customers. Please check your webhook."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CustomerRecord;

    #[test]
    fn test_query_required() {
        assert_eq!(
            CustomerSearchForm::new("   ", SearchType::All).validate(),
            Err(ValidationError::Incomplete(
                "Please enter a name or phone number to search".to_string()
            ))
        );
    }

    #[test]
    fn test_query_too_long() {
        let form = CustomerSearchForm::new("x".repeat(101), SearchType::Name);
        assert!(matches!(form.validate(), Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn test_request_trims_query() {
        let form = CustomerSearchForm::new("  0712 ", SearchType::Phone);
        match form.to_request(&ShopConfig::default(), Utc::now()).unwrap() {
            WebhookRequest::SearchCustomer { search, .. } => {
                assert_eq!(search.query, "0712");
                assert_eq!(search.search_type, SearchType::Phone);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_interpret_counts_customers() {
        let form = CustomerSearchForm::new("Jane", SearchType::Name);

        assert_eq!(
            form.interpret(&CustomerSearchResponse::default()).unwrap(),
            "Found 0 customer(s)"
        );

        let response = CustomerSearchResponse {
            customers: vec![CustomerRecord {
                name: Some("Jane Doe".to_string()),
                ..CustomerRecord::default()
            }],
            message: None,
        };
        assert_eq!(
            form.interpret(&response).unwrap(),
            "Found 1 customer(s)\n- Jane Doe"
        );
    }
}
