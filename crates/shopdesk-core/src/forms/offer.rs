//! Offer broadcast form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WebhookForm;
use crate::config::ShopConfig;
use crate::error::ValidationError;
use crate::money::Money;
use crate::protocol::{DealType, OfferImage, OfferPayload, OfferResponse, OfferShop, WebhookRequest};
use crate::validation::{is_blank, ValidationResult};

impl OfferImage {
    /// Encodes raw file bytes as a `data:<mime>;base64,...` URL.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        OfferImage {
            name: name.into(),
            data: format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)),
            mime_type,
        }
    }

    /// MIME type guessed from a file extension. Unknown extensions fall back
    /// to `application/octet-stream`.
    pub fn mime_for_extension(extension: &str) -> &'static str {
        match extension.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

/// A promotion to broadcast to the WhatsApp group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferForm {
    pub phone_model: String,
    pub price: String,
    pub features: String,
    pub deal_type: DealType,
    pub images: Vec<OfferImage>,
}

impl OfferForm {
    pub fn attach_image(&mut self, image: OfferImage) {
        self.images.push(image);
    }

    /// Removes the image at `index`, if any.
    pub fn remove_image(&mut self, index: usize) -> Option<OfferImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }
}

impl WebhookForm for OfferForm {
    type Response = OfferResponse;

    const NAME: &'static str = "offer";

    fn validate(&self) -> ValidationResult<()> {
        if is_blank(&self.phone_model) || is_blank(&self.price) {
            return Err(ValidationError::Incomplete(
                "Please enter phone model and price".to_string(),
            ));
        }
        Money::parse_positive("price", &self.price)?;
        Ok(())
    }

    fn to_request(&self, config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.validate()?;

        Ok(WebhookRequest::BroadcastOffer {
            timestamp: now,
            offer: OfferPayload {
                phone_model: self.phone_model.trim().to_string(),
                price: Money::parse_positive("price", &self.price)?.to_major_units(),
                features: self.features.trim().to_string(),
                deal_type: self.deal_type,
                images: self.images.clone(),
            },
            shop: OfferShop::from(config),
        })
    }

    fn interpret(&self, response: &OfferResponse) -> Result<String, String> {
        Ok(format!(
            "Offer broadcast initiated!\n{}",
            response
                .message()
                .unwrap_or("AI-generated message will be sent to WhatsApp group shortly.")
        ))
    }

    fn failure_message(&self) -> &'static str {
        "Failed to send offer. Please check your webhook."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OfferForm {
        OfferForm {
            phone_model: "Galaxy A15".to_string(),
            price: "18,999".to_string(),
            features: "128GB, 50MP camera".to_string(),
            deal_type: DealType::Discount,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_image_data_url() {
        let image = OfferImage::from_bytes("dot.png", "image/png", b"hello");
        assert_eq!(image.data, "data:image/png;base64,aGVsbG8=");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(OfferImage::mime_for_extension("JPG"), "image/jpeg");
        assert_eq!(OfferImage::mime_for_extension("txt"), "application/octet-stream");
    }

    #[test]
    fn test_model_and_price_required() {
        let mut form = filled();
        form.phone_model.clear();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Incomplete(
                "Please enter phone model and price".to_string()
            ))
        );
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_features_are_optional() {
        let mut form = filled();
        form.features.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_attach_and_remove_images() {
        let mut form = filled();
        form.attach_image(OfferImage::from_bytes("a.png", "image/png", b"a"));
        form.attach_image(OfferImage::from_bytes("b.png", "image/png", b"b"));

        assert_eq!(form.remove_image(5), None);
        assert_eq!(form.remove_image(0).map(|i| i.name), Some("a.png".to_string()));
        assert_eq!(form.images.len(), 1);
    }

    #[test]
    fn test_request_and_messages() {
        let mut form = filled();
        form.attach_image(OfferImage::from_bytes("a.png", "image/png", b"a"));

        match form.to_request(&ShopConfig::default(), Utc::now()).unwrap() {
            WebhookRequest::BroadcastOffer { offer, shop, .. } => {
                assert_eq!(offer.price, 18999.0);
                assert_eq!(offer.deal_type, DealType::Discount);
                assert_eq!(offer.images.len(), 1);
                assert_eq!(shop.inquiry_number, "+254712345678");
            }
            other => panic!("unexpected request {other:?}"),
        }

        assert_eq!(
            form.interpret(&OfferResponse::default()).unwrap(),
            "Offer broadcast initiated!\nAI-generated message will be sent to WhatsApp group shortly."
        );
    }
}
