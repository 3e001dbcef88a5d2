//! # Sale Commands

use shopdesk_core::forms::SaleForm;

use crate::commands::submit_as_staff;
use crate::error::ApiError;
use crate::state::{AppContext, FormController};

/// Records a sale. The workflow sends the customer's WhatsApp receipt and
/// updates inventory.
pub async fn submit_sale(
    ctx: &AppContext,
    controller: &FormController<SaleForm>,
) -> Result<String, ApiError> {
    Ok(submit_as_staff(ctx, controller).await?.message)
}
