//! # Form Controller
//!
//! Holds one form, its status line and an in-flight flag.
//!
//! ## Submit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(ctx)                                                            │
//! │    │                                                                    │
//! │    ├─ already in flight? ─────────────► BUSY                            │
//! │    ├─ form.validate() fails ──────────► error status, no request        │
//! │    ├─ webhook URL blank ──────────────► "Please configure ..."          │
//! │    ├─ POST                                                              │
//! │    │    ├─ no answer ─────────────────► "Error: <details>"              │
//! │    │    ├─ non-2xx ───────────────────► form.failure_message()          │
//! │    │    └─ 2xx ─► form.interpret()                                      │
//! │    │              ├─ Err(text) ───────► error status                    │
//! │    │              └─ Ok(text) ─► commit(reply)  (submit_and_then)     │
//! │    │                              ├─ Err ─────► error status             │
//! │    │                              └─ Ok ──────► success status, reset    │
//! │    │                                                                    │
//! │  On any error the typed values stay in the form for a retry.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The form and status sit behind `std::sync::Mutex`; no lock is held across
//! an `.await`. The in-flight flag is an `AtomicBool`.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use shopdesk_core::WebhookForm;
use shopdesk_webhook::{send, WebhookError};

use crate::error::{ApiError, ErrorCode};
use crate::state::AppContext;

/// Outcome shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

impl FormStatus {
    pub fn success(message: impl Into<String>) -> Self {
        FormStatus {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        FormStatus {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// A successful submission.
#[derive(Debug, Clone)]
pub struct Submission<R> {
    /// The success text, also stored as the form status.
    pub message: String,
    /// The decoded reply, for callers that need more than the text.
    pub response: R,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct FormController<F: WebhookForm> {
    form: Mutex<F>,
    status: Mutex<Option<FormStatus>>,
    in_flight: AtomicBool,
}

impl<F: WebhookForm> Default for FormController<F> {
    fn default() -> Self {
        Self::with_form(F::default())
    }
}

impl<F: WebhookForm> FormController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: F) -> Self {
        FormController {
            form: Mutex::new(form),
            status: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    // A poisoned lock still holds plain data; keep using it.
    fn lock_form(&self) -> MutexGuard<'_, F> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_status(&self) -> MutexGuard<'_, Option<FormStatus>> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current form values.
    pub fn form(&self) -> F {
        self.lock_form().clone()
    }

    /// Edits the form in place.
    pub fn update<R>(&self, edit: impl FnOnce(&mut F) -> R) -> R {
        edit(&mut self.lock_form())
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.lock_status().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Puts the blank form back and clears the status.
    pub fn reset(&self) {
        *self.lock_form() = F::default();
        *self.lock_status() = None;
    }

    fn fail(&self, error: ApiError) -> ApiError {
        warn!(form = F::NAME, code = ?error.code, message = %error.message, "Submission failed");
        *self.lock_status() = Some(FormStatus::error(error.message.clone()));
        error
    }

    /// Validates, sends and interprets the current form.
    pub async fn submit(&self, ctx: &AppContext) -> Result<Submission<F::Response>, ApiError> {
        self.submit_and_then(ctx, |response| async move { Ok(response) }).await
    }

    /// Like [`submit`](Self::submit), but runs `commit` on an accepted reply
    /// before the form is reset. A failing `commit` is reported like any other
    /// failure and leaves the typed values in place.
    pub async fn submit_and_then<C, Fut>(
        &self,
        ctx: &AppContext,
        commit: C,
    ) -> Result<Submission<F::Response>, ApiError>
    where
        C: FnOnce(F::Response) -> Fut,
        Fut: Future<Output = Result<F::Response, ApiError>>,
    {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(ApiError::busy());
        }
        let _guard = InFlight(&self.in_flight);

        debug!(form = F::NAME, "Submitting form");
        let form = self.form();

        if let Err(e) = form.validate() {
            return Err(self.fail(e.into()));
        }

        let config = ctx.config().await;
        if !config.is_webhook_configured() {
            return Err(self.fail(ApiError::not_configured()));
        }

        let request = form
            .to_request(&config, Utc::now())
            .map_err(|e| self.fail(e.into()))?;

        let response = match send::<F::Response>(ctx.transport(), config.webhook_url(), &request).await {
            Ok(response) => response,
            Err(WebhookError::Status { status }) => {
                debug!(form = F::NAME, status, "Webhook rejected request");
                return Err(self.fail(ApiError::webhook(form.failure_message())));
            }
            Err(e) => return Err(self.fail(e.into())),
        };

        let message = form
            .interpret(&response)
            .map_err(|message| self.fail(ApiError::new(ErrorCode::WebhookError, message)))?;

        let response = commit(response).await.map_err(|e| self.fail(e))?;

        info!(form = F::NAME, "Submission succeeded");
        *self.lock_form() = F::default();
        *self.lock_status() = Some(FormStatus::success(message.clone()));
        Ok(Submission { message, response })
    }
}
