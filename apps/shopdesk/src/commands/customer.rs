//! # Customer Commands

use shopdesk_core::forms::CustomerSearchForm;
use shopdesk_core::protocol::CustomerSearchResponse;

use crate::commands::submit_as_staff;
use crate::error::ApiError;
use crate::state::{AppContext, FormController, Submission};

/// Searches past customers. Matching and ranking happen in the workflow.
pub async fn search_customers(
    ctx: &AppContext,
    controller: &FormController<CustomerSearchForm>,
) -> Result<Submission<CustomerSearchResponse>, ApiError> {
    submit_as_staff(ctx, controller).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{logged_in_context, RecordingTransport};
    use shopdesk_core::protocol::SearchType;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_returns_records() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            r#"{"customers": [
                {"customerName": "Jane Doe", "phoneNumber": "+254700000002"},
                {"customerName": "Jane Roe"}
            ]}"#,
        ));
        let ctx = logged_in_context(transport).await;
        let controller = FormController::with_form(CustomerSearchForm::new("Jane", SearchType::Name));

        let submission = search_customers(&ctx, &controller).await.unwrap();
        assert_eq!(submission.response.customers.len(), 2);
        assert!(submission.message.starts_with("Found 2 customer(s)"));
    }

    #[tokio::test]
    async fn test_failure_message() {
        let transport = Arc::new(RecordingTransport::replying(404, ""));
        let ctx = logged_in_context(transport).await;
        let controller = FormController::with_form(CustomerSearchForm::new("0712", SearchType::Phone));

        let err = search_customers(&ctx, &controller).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookError);
        assert_eq!(
            err.message,
            "Failed to search customers. Please check your webhook."
        );
    }
}
