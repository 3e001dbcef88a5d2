//! # Validation Module
//!
//! Field validators shared by the staff forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (THIS MODULE)                                           │
//! │  ├── Required fields, number parsing, URL / phone / email format       │
//! │  └── Reported inline, no network call is made                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Configuration                                                │
//! │  └── Webhook URL must be set before anything is sent                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Webhook workflow (external)                                  │
//! │  └── Stock levels, duplicate customers, etc. (opaque to us)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopdesk_core::validation::{parse_quantity, validate_email};
//!
//! assert_eq!(parse_quantity("12").unwrap(), 12);
//! assert!(validate_email("staff@shop.co.ke").is_ok());
//! ```

use url::Url;

use crate::error::ValidationError;
use crate::{DEFAULT_MINIMUM_STOCK, MAX_ITEM_QUANTITY, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Returns true when the value is empty or whitespace only.
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns the trimmed value, or `None` when it is blank.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one `@` with a non-empty local part and a domain containing a dot
/// - No whitespace inside the address
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let invalid = || ValidationError::invalid_format("email", "must look like name@example.com");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Spaces, hyphens and parentheses are ignored
/// - Optional leading `+`
/// - 7 to 15 digits (E.164 upper bound)
///
/// ## Example
/// ```rust
/// use shopdesk_core::validation::validate_phone;
///
/// assert!(validate_phone("phoneNumber", "+254 712 345 678").is_ok());
/// assert!(validate_phone("phoneNumber", "call me").is_err());
/// ```
pub fn validate_phone(field: &str, phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::required(field));
    }

    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            "must contain only digits and an optional leading +",
        ));
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::invalid_format(
            field,
            "must have between 7 and 15 digits",
        ));
    }

    Ok(())
}

/// Validates an absolute `http`/`https` URL and returns it parsed.
pub fn validate_http_url(field: &str, value: &str) -> ValidationResult<Url> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    let url = Url::parse(value)
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::invalid_format(
                field,
                format!("unsupported scheme '{other}', expected http or https"),
            ))
        }
    }

    if url.host_str().is_none() {
        return Err(ValidationError::invalid_format(field, "missing host"));
    }

    Ok(url)
}

/// Validates a customer search query.
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn parse_integer(field: &str, text: &str) -> ValidationResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a whole number"))
}

/// Parses an inventory quantity.
///
/// ## Rules
/// - Must be a whole number
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    if is_blank(text) {
        return Err(ValidationError::required("quantity"));
    }

    let qty = parse_integer("quantity", text)?;

    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(qty)
}

/// Parses the minimum-stock threshold.
///
/// A blank field falls back to [`DEFAULT_MINIMUM_STOCK`]; zero is allowed.
pub fn parse_minimum_stock(text: &str) -> ValidationResult<i64> {
    if is_blank(text) {
        return Ok(DEFAULT_MINIMUM_STOCK);
    }

    let min = parse_integer("minimumStock", text)?;

    if !(0..=MAX_ITEM_QUANTITY).contains(&min) {
        return Err(ValidationError::OutOfRange {
            field: "minimumStock".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("staff@shop.co.ke").is_ok());
        assert!(validate_email("  Staff@Shop.com ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@shop.com").is_err());
        assert!(validate_email("a@b@shop.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_email("a b@shop.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("phone", "+254712345678").is_ok());
        assert!(validate_phone("phone", "0712-345-678").is_ok());
        assert!(validate_phone("phone", "(071) 234 5678").is_ok());

        assert!(validate_phone("phone", "").is_err());
        assert!(validate_phone("phone", "12345").is_err());
        assert!(validate_phone("phone", "+2547123456789012").is_err());
        assert!(validate_phone("phone", "07x2345678").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        let url = validate_http_url("webhookUrl", "https://n8n.example.com/webhook/phone-shop")
            .unwrap();
        assert_eq!(url.host_str(), Some("n8n.example.com"));

        assert!(validate_http_url("webhookUrl", "").is_err());
        assert!(validate_http_url("webhookUrl", "n8n.example.com/webhook").is_err());
        assert!(validate_http_url("webhookUrl", "ftp://files.example.com").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 25 ").unwrap(), 25);

        assert!(matches!(
            parse_quantity(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("10000").is_err());
    }

    #[test]
    fn test_parse_minimum_stock() {
        assert_eq!(parse_minimum_stock("").unwrap(), DEFAULT_MINIMUM_STOCK);
        assert_eq!(parse_minimum_stock("0").unwrap(), 0);
        assert_eq!(parse_minimum_stock("12").unwrap(), 12);
        assert!(parse_minimum_stock("-1").is_err());
        assert!(parse_minimum_stock("many").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  Jane ").unwrap(), "Jane");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
