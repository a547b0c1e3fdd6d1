//! healthplex-export
//!
//! Review summaries and document snapshots of a submission, rendered from
//! Tera templates and packed as DOCX.

pub mod docx;
pub mod error;
pub mod render;
pub mod snapshot;
pub mod styles;
pub mod templates;

pub use error::ExportError;
pub use snapshot::{DocxSnapshot, SnapshotRenderer, attachment_filename, build_attachment};
