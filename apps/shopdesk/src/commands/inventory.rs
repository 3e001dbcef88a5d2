//! # Inventory Commands
//!
//! Stock levels live in the workflow; this only reports movements.

use shopdesk_core::forms::InventoryForm;

use crate::commands::submit_as_staff;
use crate::error::ApiError;
use crate::state::{AppContext, FormController};

pub async fn submit_inventory(
    ctx: &AppContext,
    controller: &FormController<InventoryForm>,
) -> Result<String, ApiError> {
    Ok(submit_as_staff(ctx, controller).await?.message)
}
