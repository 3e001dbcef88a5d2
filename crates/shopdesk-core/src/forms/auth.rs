//! Signup and login forms.
//!
//! Both hold the plaintext password only until [`WebhookForm::to_request`]
//! turns it into a [`CredentialSubmission`]. The password is never
//! serialized and their `Debug` output hides it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::WebhookForm;
use crate::config::ShopConfig;
use crate::credential::{validate_login, validate_signup, CredentialSubmission};
use crate::error::ValidationError;
use crate::protocol::{AuthResponse, WebhookRequest};
use crate::validation::{is_blank, ValidationResult};

// =============================================================================
// Signup
// =============================================================================

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl SignupForm {
    fn check_complete(&self) -> ValidationResult<()> {
        let required = [&self.full_name, &self.email, &self.phone_number];
        if required.iter().any(|value| is_blank(value)) || self.password.is_empty() {
            return Err(ValidationError::Incomplete(
                "Please fill in all fields".to_string(),
            ));
        }
        Ok(())
    }

    fn submission(&self) -> ValidationResult<CredentialSubmission> {
        CredentialSubmission::signup(
            &self.full_name,
            &self.email,
            &self.phone_number,
            &self.password,
        )
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl WebhookForm for SignupForm {
    type Response = AuthResponse;

    const NAME: &'static str = "signup";

    fn validate(&self) -> ValidationResult<()> {
        self.check_complete()?;
        validate_signup(&self.full_name, &self.email, &self.phone_number, &self.password)
    }

    fn to_request(&self, _config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.check_complete()?;

        Ok(WebhookRequest::SignupRequest {
            timestamp: now,
            user: self.submission()?.to_payload(),
        })
    }

    fn interpret(&self, response: &AuthResponse) -> Result<String, String> {
        if response.success == Some(false) {
            return Err(response
                .message()
                .unwrap_or("Signup was rejected")
                .to_string());
        }
        Ok(response
            .message()
            .unwrap_or("Account created! You can now log in.")
            .to_string())
    }

    fn failure_message(&self) -> &'static str {
        "Failed to create account. Please check your webhook."
    }
}

// =============================================================================
// Login
// =============================================================================

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    fn check_complete(&self) -> ValidationResult<()> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(ValidationError::Incomplete(
                "Please enter your email and password".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl WebhookForm for LoginForm {
    type Response = AuthResponse;

    const NAME: &'static str = "login";

    fn validate(&self) -> ValidationResult<()> {
        self.check_complete()?;
        validate_login(&self.email, &self.password)
    }

    fn to_request(&self, _config: &ShopConfig, now: DateTime<Utc>) -> ValidationResult<WebhookRequest> {
        self.check_complete()?;

        Ok(WebhookRequest::LoginRequest {
            timestamp: now,
            user: CredentialSubmission::login(&self.email, &self.password)?.to_payload(),
        })
    }

    /// Login only succeeds with `success: true` and a user object.
    fn interpret(&self, response: &AuthResponse) -> Result<String, String> {
        match (&response.success, &response.user) {
            (Some(true), Some(user)) => Ok(format!("Welcome, {}!", user.display_name())),
            _ => Err(response
                .message()
                .unwrap_or("Invalid email or password")
                .to_string()),
        }
    }

    fn failure_message(&self) -> &'static str {
        "Failed to log in. Please check your webhook."
    }
}
