use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use healthplex_payload::{Attachment, StructuredPayload};

use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::render::render_snapshot;
use crate::styles::DocumentStyles;

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Produces a document copy of a submission.
pub trait SnapshotRenderer {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &str;

    fn mime_type(&self) -> &str;

    fn render(&self, payload: &StructuredPayload) -> Result<Vec<u8>, ExportError>;
}

/// Renders the snapshot template and packs it as a Word document.
#[derive(Debug, Clone, Default)]
pub struct DocxSnapshot {
    pub styles: DocumentStyles,
}

impl SnapshotRenderer for DocxSnapshot {
    fn extension(&self) -> &str {
        "docx"
    }

    fn mime_type(&self) -> &str {
        DOCX_MIME_TYPE
    }

    fn render(&self, payload: &StructuredPayload) -> Result<Vec<u8>, ExportError> {
        let rendered = render_snapshot(payload)?;
        generate_docx(&rendered, &self.styles)
    }
}

/// `intake-form-<last name>-<YYYY-MM-DD>.<ext>`, with `patient` standing in
/// for a blank last name.
pub fn attachment_filename(last_name: &str, date: &str, extension: &str) -> String {
    let last_name = match last_name.trim() {
        "" => "patient",
        name => name,
    };
    format!("intake-form-{last_name}-{date}.{extension}")
}

/// Render a snapshot of `payload` and wrap it as a base64 attachment.
///
/// `date` is the submission date used in the filename.
pub fn build_attachment(
    renderer: &dyn SnapshotRenderer,
    payload: &StructuredPayload,
    date: &str,
) -> Result<Attachment, ExportError> {
    let bytes = renderer.render(payload)?;
    let filename = attachment_filename(&payload.contact.last_name, date, renderer.extension());
    tracing::info!(filename = %filename, bytes = bytes.len(), "rendered snapshot");
    Ok(Attachment {
        filename,
        mime_type: renderer.mime_type().to_string(),
        base64_data: STANDARD.encode(bytes),
    })
}
