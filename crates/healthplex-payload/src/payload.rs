use serde::{Deserialize, Serialize};

use healthplex_core::schema::{step, WIZARD_DURATION};
use healthplex_core::{FlatFormData, FormType};

use crate::consultation::{self, ConsultationSection};
use crate::contact::Contact;
use crate::context::{Meta, SubmissionContext};
use crate::error::PayloadError;
use crate::family::{self, FamilySection};
use crate::lifestyle::{self, Lifestyle, Medications};
use crate::metabolic::{self, MetabolicSection};

/// The JSON document posted to a form's webhook.
///
/// Sections a form type does not collect are left out of the JSON
/// entirely; fields inside a present section always appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPayload {
    #[serde(rename = "_meta")]
    pub meta: Meta,
    /// Sanitized flat values, minus questionnaire items for the wizard.
    pub raw_data: FlatFormData,
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation: Option<ConsultationSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_history: Option<FamilySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metabolic_assessment: Option<MetabolicSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Lifestyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Medications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_attachment: Option<Attachment>,
}

/// A rendered copy of the form sent along with the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub base64_data: String,
}

impl StructuredPayload {
    pub fn form_type(&self) -> FormType {
        self.meta.form_type
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.pdf_attachment = Some(attachment);
        self
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the structured payload for one submission.
///
/// String values are sanitized before any section reads them. A field whose
/// value has the wrong shape (a list where text is expected) fails the build.
pub fn build_payload(
    form_type: FormType,
    data: &FlatFormData,
    ctx: &SubmissionContext,
) -> Result<StructuredPayload, PayloadError> {
    let data = data.sanitized();
    let mut meta = Meta::new(form_type, ctx);

    let payload = match form_type {
        FormType::NewConsultation => StructuredPayload {
            contact: Contact::from_fields(&data)?,
            consultation: Some(consultation::build(&data)?),
            ..empty(meta, data.clone())
        },
        FormType::FamilyHistory => StructuredPayload {
            contact: Contact::from_fields(&data)?,
            family_history: Some(family::build(&data)?),
            ..empty(meta, data.clone())
        },
        FormType::MetabolicAssessment => StructuredPayload {
            contact: Contact::from_full_name(&data)?,
            metabolic_assessment: Some(metabolic::build(&data, true)?),
            ..empty(meta, data.clone())
        },
        FormType::IntakeWizard => {
            meta.completed_steps = Some((1..=step::TOTAL).collect());
            meta.total_time_minutes = Some(data.int(WIZARD_DURATION)?.unwrap_or(0));
            StructuredPayload {
                contact: Contact::from_fields(&data)?,
                consultation: Some(consultation::build(&data)?),
                family_history: Some(family::build(&data)?),
                metabolic_assessment: Some(metabolic::build(&data, false)?),
                lifestyle: Some(lifestyle::build(&data)?),
                medications: Some(lifestyle::build_medications(&data)?),
                ..empty(meta, data.without_questions())
            }
        }
    };

    tracing::info!(
        form_type = %form_type,
        raw_fields = payload.raw_data.len(),
        "built structured payload"
    );
    Ok(payload)
}

fn empty(meta: Meta, raw_data: FlatFormData) -> StructuredPayload {
    StructuredPayload {
        meta,
        raw_data,
        contact: Contact::default(),
        consultation: None,
        family_history: None,
        metabolic_assessment: None,
        lifestyle: None,
        medications: None,
        pdf_attachment: None,
    }
}
