//! # Offer Commands
//!
//! Broadcasts a promotion. The workflow writes the WhatsApp text with AI and
//! posts it to the group along with the attached images.

use std::path::Path;

use tracing::debug;

use shopdesk_core::forms::OfferForm;
use shopdesk_core::protocol::OfferImage;

use crate::commands::submit_as_staff;
use crate::error::ApiError;
use crate::state::{AppContext, FormController};

/// Reads an image file into a data-URL attachment. MIME type comes from the
/// file extension.
pub async fn load_image(path: &Path) -> Result<OfferImage, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::validation(format!("Cannot read image {}: {e}", path.display())))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(name = %name, bytes = bytes.len(), "Attached offer image");
    Ok(OfferImage::from_bytes(
        name,
        OfferImage::mime_for_extension(&extension),
        &bytes,
    ))
}

/// Reads `path` and adds it to the controller's form.
pub async fn attach_image(
    controller: &FormController<OfferForm>,
    path: &Path,
) -> Result<(), ApiError> {
    let image = load_image(path).await?;
    controller.update(|form| form.attach_image(image));
    Ok(())
}

pub async fn broadcast_offer(
    ctx: &AppContext,
    controller: &FormController<OfferForm>,
) -> Result<String, ApiError> {
    Ok(submit_as_staff(ctx, controller).await?.message)
}
