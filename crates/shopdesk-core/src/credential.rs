//! # Credential Preparation
//!
//! Turns what staff type into the login/signup fields the webhook expects.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  email ───────► normalize_email() ──► "amina@shop.co.ke"               │
//! │                                                                         │
//! │  password ────► score_strength() ──► Rejected/Weak? stop (signup only) │
//! │      │                                                                  │
//! │      └────────► digest() ──────────► 64 hex chars (SHA-256)            │
//! │                                                                         │
//! │  CredentialSubmission { email, password_digest, full_name?, phone? }   │
//! │  The plaintext never leaves this module.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Weakness
//! The digest is an unsalted SHA-256 computed on the client. The receiving
//! workflow stores and compares exactly this value, so it is kept as is. It
//! is not a password hash in the KDF sense: identical passwords produce
//! identical digests and dictionary attacks against it are cheap.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::protocol::UserPayload;
use crate::validation::{is_blank, validate_email, validate_phone, ValidationResult};

/// Passwords shorter than this are rejected outright.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length that earns the extra "long password" point.
pub const LONG_PASSWORD_LENGTH: usize = 12;

/// Length of the hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LENGTH: usize = 64;

// =============================================================================
// Digest
// =============================================================================

/// SHA-256 of the UTF-8 password, lowercase hex.
///
/// Deterministic and unsalted: the same password always yields the same digest.
pub fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Lower-cases and trims an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Strength Scoring
// =============================================================================

/// Strength tier shown next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StrengthTier {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    Rejected,
    /// 0-2 points.
    Weak,
    /// 3 points.
    Moderate,
    /// 4-5 points.
    Strong,
}

impl StrengthTier {
    fn from_points(points: u8) -> Self {
        match points {
            0..=2 => StrengthTier::Weak,
            3 => StrengthTier::Moderate,
            _ => StrengthTier::Strong,
        }
    }

    /// Whether a signup may proceed with a password of this tier.
    pub fn allows_signup(&self) -> bool {
        matches!(self, StrengthTier::Moderate | StrengthTier::Strong)
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthTier::Rejected => write!(f, "too short"),
            StrengthTier::Weak => write!(f, "weak"),
            StrengthTier::Moderate => write!(f, "moderate"),
            StrengthTier::Strong => write!(f, "strong"),
        }
    }
}

/// Result of [`score_strength`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StrengthReport {
    pub tier: StrengthTier,
    pub points: u8,
    /// Hints for each criterion the password misses.
    pub reasons: Vec<String>,
}

/// Scores a password for local feedback. Never transmitted.
///
/// ## Policy
/// ```text
/// length < 8                                   → Rejected
/// otherwise, one point each for:
///   length ≥ 8
///   length ≥ 12
///   both an uppercase and a lowercase letter (A-Z, a-z)
///   a digit (0-9)
///   a character that is neither A-Z, a-z nor 0-9
/// 0-2 → Weak    3 → Moderate    4-5 → Strong
/// ```
/// Length is counted in characters, not bytes.
///
/// ## Example
/// ```rust
/// use shopdesk_core::credential::{score_strength, StrengthTier};
///
/// assert_eq!(score_strength("abcdefg").tier, StrengthTier::Rejected);
/// assert_eq!(score_strength("Abcdef12!").tier, StrengthTier::Strong);
/// ```
pub fn score_strength(password: &str) -> StrengthReport {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return StrengthReport {
            tier: StrengthTier::Rejected,
            points: 0,
            reasons: vec![format!("Use at least {MIN_PASSWORD_LENGTH} characters")],
        };
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut points = 1;
    let mut reasons = Vec::new();

    if length >= LONG_PASSWORD_LENGTH {
        points += 1;
    } else {
        reasons.push(format!("Use {LONG_PASSWORD_LENGTH} or more characters"));
    }

    if has_upper && has_lower {
        points += 1;
    } else {
        reasons.push("Mix uppercase and lowercase letters".to_string());
    }

    if has_digit {
        points += 1;
    } else {
        reasons.push("Add a number".to_string());
    }

    if has_symbol {
        points += 1;
    } else {
        reasons.push("Add a symbol such as ! or #".to_string());
    }

    StrengthReport {
        tier: StrengthTier::from_points(points),
        points,
        reasons,
    }
}

/// Applies the signup strength gate.
///
/// `Rejected` and `Weak` passwords stop the signup before any network call.
pub fn check_signup_password(password: &str) -> ValidationResult<StrengthReport> {
    let report = score_strength(password);

    match report.tier {
        StrengthTier::Rejected => Err(ValidationError::WeakPassword(format!(
            "Password is too short: use at least {MIN_PASSWORD_LENGTH} characters"
        ))),
        StrengthTier::Weak => Err(ValidationError::WeakPassword(format!(
            "Password is too weak: {}",
            report.reasons.join(", ").to_lowercase()
        ))),
        StrengthTier::Moderate | StrengthTier::Strong => Ok(report),
    }
}

/// Login field checks. Nothing is hashed.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Signup field checks plus the strength gate. Nothing is hashed.
pub fn validate_signup(
    full_name: &str,
    email: &str,
    phone_number: &str,
    password: &str,
) -> ValidationResult<()> {
    if is_blank(full_name) {
        return Err(ValidationError::required("fullName"));
    }
    validate_email(email)?;
    validate_phone("phoneNumber", phone_number)?;
    check_signup_password(password)?;
    Ok(())
}

// =============================================================================
// Credential Submission
// =============================================================================

/// One login or signup attempt, ready to send. Never persisted.
///
/// Holds the digest only; the plaintext is dropped as soon as it is hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSubmission {
    pub email: String,
    pub password_digest: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl CredentialSubmission {
    /// Prepares a login attempt. No strength gate is applied.
    pub fn login(email: &str, password: &str) -> ValidationResult<Self> {
        validate_login(email, password)?;

        Ok(CredentialSubmission {
            email: normalize_email(email),
            password_digest: digest(password),
            full_name: None,
            phone_number: None,
        })
    }

    /// Prepares a signup attempt, enforcing the strength gate.
    pub fn signup(
        full_name: &str,
        email: &str,
        phone_number: &str,
        password: &str,
    ) -> ValidationResult<Self> {
        validate_signup(full_name, email, phone_number, password)?;

        Ok(CredentialSubmission {
            email: normalize_email(email),
            password_digest: digest(password),
            full_name: Some(full_name.trim().to_string()),
            phone_number: Some(phone_number.trim().to_string()),
        })
    }

    /// The `user` object of a signup/login request.
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            email: self.email.clone(),
            password_hash: self.password_digest.clone(),
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

impl fmt::Debug for CredentialSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSubmission")
            .field("email", &self.email)
            .field("password_digest", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_known_vector() {
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_is_deterministic_fixed_length_lowercase_hex() {
        for password in ["", "hunter2", "Abcdef12!", "pässwörd ✓"] {
            let a = digest(password);
            let b = digest(password);
            assert_eq!(a, b);
            assert_eq!(a.len(), DIGEST_HEX_LENGTH);
            assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_digest_differs_for_different_inputs() {
        assert_ne!(digest("Abcdef12!"), digest("Abcdef12?"));
        assert_ne!(digest("password"), digest("Password"));
    }

    #[test]
    fn test_short_passwords_are_rejected() {
        for password in ["", "a", "Ab1!", "abcdefg", "ÄÖÜ!1aB"] {
            assert_eq!(score_strength(password).tier, StrengthTier::Rejected);
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert_eq!(score_strength("ééééééé").tier, StrengthTier::Rejected);
        // 8 characters, all symbols by ASCII rules: 1 (len) + 1 (symbol)
        let report = score_strength("éééééééé");
        assert_eq!(report.points, 2);
        assert_eq!(report.tier, StrengthTier::Weak);
    }

    #[test]
    fn test_point_accumulation() {
        assert_eq!(score_strength("abcdefgh").points, 1);
        assert_eq!(score_strength("abcdefgh").tier, StrengthTier::Weak);

        assert_eq!(score_strength("abcdefg1").points, 2);
        assert_eq!(score_strength("abcdefg1").tier, StrengthTier::Weak);

        assert_eq!(score_strength("Abcdefg1").points, 3);
        assert_eq!(score_strength("Abcdefg1").tier, StrengthTier::Moderate);

        assert_eq!(score_strength("Abcdef12!").points, 4);
        assert_eq!(score_strength("Abcdef12!").tier, StrengthTier::Strong);

        assert_eq!(score_strength("Abcdef12!xyz").points, 5);
        assert_eq!(score_strength("Abcdef12!xyz").tier, StrengthTier::Strong);
    }

    #[test]
    fn test_reasons_list_missing_criteria() {
        let report = score_strength("abcdefgh");
        assert_eq!(report.reasons.len(), 4);

        let report = score_strength("Abcdef12!xyz");
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn test_signup_gate() {
        assert!(matches!(
            check_signup_password("abcdefg"),
            Err(ValidationError::WeakPassword(msg)) if msg.contains("too short")
        ));
        assert!(matches!(
            check_signup_password("abcdefgh"),
            Err(ValidationError::WeakPassword(msg)) if msg.contains("too weak")
        ));
        assert!(check_signup_password("Abcdefg1").is_ok());
        assert!(check_signup_password("Abcdef12!").is_ok());
    }

    #[test]
    fn test_login_submission_normalizes_email_and_hashes() {
        let submission = CredentialSubmission::login("  Amina@Shop.CO.KE ", "Abcdef12!").unwrap();
        assert_eq!(submission.email, "amina@shop.co.ke");
        assert_eq!(submission.password_digest, digest("Abcdef12!"));
        assert!(submission.full_name.is_none());
    }

    #[test]
    fn test_signup_submission_carries_profile() {
        let submission = CredentialSubmission::signup(
            " Amina Wanjiru ",
            "amina@shop.co.ke",
            "+254712345678",
            "Abcdef12!",
        )
        .unwrap();
        assert_eq!(submission.full_name.as_deref(), Some("Amina Wanjiru"));
        assert_eq!(submission.phone_number.as_deref(), Some("+254712345678"));
    }

    #[test]
    fn test_validate_signup_matches_submission() {
        assert!(validate_signup("Amina", "amina@shop.co.ke", "+254712345678", "Abcdef12!").is_ok());
        assert!(matches!(
            validate_signup("Amina", "amina@shop.co.ke", "+254712345678", "abcdefg"),
            Err(ValidationError::WeakPassword(_))
        ));
        assert_eq!(
            validate_signup(" ", "amina@shop.co.ke", "+254712345678", "Abcdef12!"),
            Err(ValidationError::required("fullName"))
        );
        assert_eq!(
            validate_login("a@shop.com", ""),
            Err(ValidationError::required("password"))
        );
    }

    #[test]
    fn test_debug_never_shows_digest() {
        let submission = CredentialSubmission::login("a@shop.com", "Abcdef12!").unwrap();
        let debug = format!("{submission:?}");
        assert!(!debug.contains(&digest("Abcdef12!")));
        assert!(debug.contains("a@shop.com"));
    }
}
