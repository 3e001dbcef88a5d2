//! # State Module
//!
//! ```text
//! state/
//! ├── context.rs  ◄─── AppContext: config, session, stores, transport
//! └── form.rs     ◄─── FormController: one form + status + in-flight flag
//! ```
//! Commands receive `&AppContext` and, for form submissions, the
//! `&FormController` of that form.

mod context;
mod form;

pub use context::AppContext;
pub use form::{FormController, FormStatus, StatusKind, Submission};
