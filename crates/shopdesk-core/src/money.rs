//! # Money Module
//!
//! Provides the `Money` type for amounts typed into the staff forms.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form input "49.99"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Money::parse("amount", "49.99")  → Money(4999)   exact, validated      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  money.to_major_units()           → 49.99         JSON number on wire   │
//! │                                                                         │
//! │  Parsing straight to f64 would accept "1e3", "NaN" or "12.345"; going   │
//! │  through integer minor units rejects them before anything is sent.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopdesk_core::money::Money;
//!
//! let amount = Money::parse("amount", "50,000").unwrap();
//! assert_eq!(amount.cents(), 5_000_000);
//! assert_eq!(amount.to_major_units(), 50000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Number of minor units in one major unit (cents per shilling/dollar).
const MINOR_PER_MAJOR: i64 = 100;

/// A monetary value in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates money from minor units (cents).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units (cents).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the amount in major units, as sent to the webhook.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Parses a non-negative decimal amount typed by staff.
    ///
    /// ## Rules
    /// - Must not be blank
    /// - Digits with an optional `.` and at most two decimals
    /// - Thousands separators (`,`) are ignored
    /// - Negative values are rejected
    ///
    /// ## Example
    /// ```rust
    /// use shopdesk_core::money::Money;
    ///
    /// assert_eq!(Money::parse("price", "49.9").unwrap().cents(), 4990);
    /// assert!(Money::parse("price", "12.345").is_err());
    /// assert!(Money::parse("price", "-5").is_err());
    /// ```
    pub fn parse(field: &str, text: &str) -> ValidationResult<Money> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValidationError::required(field));
        }

        if text.starts_with('-') {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }

        let compact: String = text.chars().filter(|c| *c != ',').collect();
        let invalid = || ValidationError::invalid_format(field, "must be an amount like 1500 or 49.99");

        let (whole, frac) = match compact.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (compact.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(invalid)
    }

    /// Parses an amount that must be strictly greater than zero.
    pub fn parse_positive(field: &str, text: &str) -> ValidationResult<Money> {
        let money = Money::parse(field, text)?;
        if money.is_zero() {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
        Ok(money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_PER_MAJOR as u64,
            abs % MINOR_PER_MAJOR as u64
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_decimal() {
        assert_eq!(Money::parse("amount", "50000").unwrap().cents(), 5_000_000);
        assert_eq!(Money::parse("amount", "49.99").unwrap().cents(), 4999);
        assert_eq!(Money::parse("amount", "0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse("amount", "1,250.00").unwrap().cents(), 125_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("amount", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse("amount", "abc").is_err());
        assert!(Money::parse("amount", ".5").is_err());
        assert!(Money::parse("amount", "1e3").is_err());
        assert!(Money::parse("amount", "10.001").is_err());
        assert!(Money::parse("amount", "99999999999999999999").is_err());
        assert!(matches!(
            Money::parse("amount", "-10"),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_parse_positive_rejects_zero() {
        assert!(Money::parse_positive("price", "0").is_err());
        assert!(Money::parse_positive("price", "0.01").is_ok());
    }

    #[test]
    fn test_major_units_and_display() {
        let money = Money::from_cents(4999);
        assert_eq!(money.to_major_units(), 49.99);
        assert_eq!(money.to_string(), "49.99");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }
}
