use serde::Serialize;
use tera::{Context, Tera};

use healthplex_core::FlatFormData;
use healthplex_payload::StructuredPayload;

use crate::error::ExportError;
use crate::templates;

/// Render a Tera template with any serializable value as its context.
///
/// The value's top-level fields become the template variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    value: &T,
) -> Result<String, ExportError> {
    let context = Context::from_value(serde_json::to_value(value)?)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    render_with_context(template_name, template_content, &context)
}

fn render_with_context(
    template_name: &str,
    template_content: &str,
    context: &Context,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
    Ok(tera.render(template_name, context)?)
}

/// Values shown on the wizard's review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub complaint: String,
}

impl ReviewSummary {
    pub fn from_data(data: &FlatFormData) -> Result<Self, ExportError> {
        Ok(Self {
            first_name: data.text_or_empty("firstName")?.to_string(),
            last_name: data.text_or_empty("lastName")?.to_string(),
            email: data.text_or_empty("email")?.to_string(),
            phone: data.text_or_empty("phone")?.to_string(),
            complaint: data
                .non_empty_text("complaint1")?
                .unwrap_or("Not specified")
                .to_string(),
        })
    }
}

pub fn render_review_summary(data: &FlatFormData) -> Result<String, ExportError> {
    let summary = ReviewSummary::from_data(data)?;
    render_template(
        templates::REVIEW_SUMMARY_NAME,
        templates::REVIEW_SUMMARY,
        &summary,
    )
}

/// Render the snapshot document text of a built payload.
///
/// `_meta` is exposed to the template as `meta`.
pub fn render_snapshot(payload: &StructuredPayload) -> Result<String, ExportError> {
    let mut context = Context::from_value(serde_json::to_value(payload)?)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("meta", &payload.meta);
    render_with_context(templates::SNAPSHOT_NAME, templates::SNAPSHOT, &context)
}
