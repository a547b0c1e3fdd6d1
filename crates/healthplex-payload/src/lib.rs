//! healthplex-payload
//!
//! Turns flat form data into the structured JSON document posted to the
//! clinic's webhook.

pub mod consultation;
pub mod contact;
pub mod context;
pub mod error;
pub mod family;
pub mod lifestyle;
pub mod metabolic;
pub mod payload;

pub use context::SubmissionContext;
pub use error::PayloadError;
pub use payload::{build_payload, Attachment, StructuredPayload};
