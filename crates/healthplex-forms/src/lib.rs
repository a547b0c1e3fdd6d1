//! healthplex-forms
//!
//! Form sessions: static configuration, draft persistence, webhook
//! submission, and the multi-step intake wizard.

pub mod config;
pub mod draft;
pub mod error;
pub mod session;
pub mod webhook;
pub mod wizard;

pub use config::FormsConfig;
pub use error::{FormsError, SubmitError};
pub use session::FormSession;
pub use webhook::{SubmissionResult, Submitter};
pub use wizard::IntakeWizard;
