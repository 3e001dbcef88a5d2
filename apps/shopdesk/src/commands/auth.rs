//! # Auth Commands
//!
//! ```text
//! signup ──► strength gate ──► signup_request ──► "Account created!..."
//! login  ──► login_request ──► success + user? ──► SessionStore::establish
//! logout ──► SessionStore::clear
//! ```
//! Passwords leave this process only as their SHA-256 digest.

use tracing::{debug, info};

use shopdesk_core::credential::{score_strength, StrengthReport};
use shopdesk_core::forms::{LoginForm, SignupForm};
use shopdesk_core::protocol::AuthResponse;
use shopdesk_core::SessionUser;

use crate::error::ApiError;
use crate::state::{AppContext, FormController};

/// Creates an account. Does not log in.
pub async fn signup(
    ctx: &AppContext,
    controller: &FormController<SignupForm>,
) -> Result<String, ApiError> {
    debug!("signup command");
    Ok(controller.submit(ctx).await?.message)
}

/// Logs in and persists the session. The form is only cleared once the
/// session is stored.
pub async fn login(
    ctx: &AppContext,
    controller: &FormController<LoginForm>,
) -> Result<String, ApiError> {
    debug!("login command");
    let submission = controller
        .submit_and_then(ctx, move |response: AuthResponse| async move {
            let user = response
                .user
                .clone()
                .ok_or_else(|| ApiError::internal("Login reply had no user"))?;
            ctx.establish_session(user).await?;
            Ok(response)
        })
        .await?;

    Ok(submission.message)
}

pub async fn logout(ctx: &AppContext) -> Result<(), ApiError> {
    debug!("logout command");
    ctx.clear_session().await?;
    info!("Logged out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Option<SessionUser> {
    ctx.current_user().await
}

/// Live strength feedback for the signup password field.
pub fn password_strength(password: &str) -> StrengthReport {
    score_strength(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::StatusKind;
    use crate::testing::{configured_context, RecordingTransport, WriteFailingStore};
    use shopdesk_core::credential::{digest, StrengthTier};
    use shopdesk_core::WebhookRequest;
    use std::sync::Arc;

    fn signup_form(password: &str) -> SignupForm {
        SignupForm {
            full_name: "Amina Wanjiru".to_string(),
            email: "Amina@Shop.co.ke".to_string(),
            phone_number: "+254712345678".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_short_password_blocks_signup_before_network() {
        let transport = Arc::new(RecordingTransport::new());
        let ctx = configured_context(transport.clone()).await;

        let err = signup(&ctx, &FormController::with_form(signup_form("abcdefg")))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("too short"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_strong_password_reaches_network_as_digest() {
        assert_eq!(password_strength("Abcdef12!").tier, StrengthTier::Strong);

        let transport = Arc::new(RecordingTransport::new());
        let ctx = configured_context(transport.clone()).await;

        let message = signup(&ctx, &FormController::with_form(signup_form("Abcdef12!")))
            .await
            .unwrap();
        assert_eq!(message, "Account created! You can now log in.");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            WebhookRequest::SignupRequest { user, .. } => {
                assert_eq!(user.email, "amina@shop.co.ke");
                assert_eq!(user.password_hash, digest("Abcdef12!"));
            }
            other => panic!("unexpected request {other:?}"),
        }
        // Signing up does not log in.
        assert!(whoami(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_login_establishes_session() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            r#"{"success": true, "user": {"id": 7, "fullName": "Amina"}}"#,
        ));
        let ctx = configured_context(transport).await;

        let message = login(
            &ctx,
            &FormController::with_form(LoginForm::new("amina@shop.co.ke", "Abcdef12!")),
        )
        .await
        .unwrap();

        assert_eq!(message, "Welcome, Amina!");
        assert_eq!(whoami(&ctx).await.unwrap().id, "7");

        logout(&ctx).await.unwrap();
        assert!(whoami(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_session_write_failure_keeps_form() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            r#"{"success": true, "user": {"id": 7, "fullName": "Amina"}}"#,
        ));
        let ctx = AppContext::load(Arc::new(WriteFailingStore::configured()), transport.clone()).await;
        let controller = FormController::with_form(LoginForm::new("amina@shop.co.ke", "Abcdef12!"));

        let err = login(&ctx, &controller).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(transport.call_count(), 1);
        assert!(whoami(&ctx).await.is_none());
        assert_eq!(controller.form().email, "amina@shop.co.ke");
        let status = controller.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, err.message);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_rejected_login_stays_logged_out() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            r#"{"success": false, "message": "Wrong password"}"#,
        ));
        let ctx = configured_context(transport).await;
        let controller = FormController::with_form(LoginForm::new("amina@shop.co.ke", "nope"));

        let err = login(&ctx, &controller).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::WebhookError);
        assert_eq!(err.message, "Wrong password");
        assert!(whoami(&ctx).await.is_none());
        assert_eq!(controller.form().email, "amina@shop.co.ke");
    }
}
