use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The form variants. Each one posts to its own webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FormType {
    NewConsultation,
    FamilyHistory,
    MetabolicAssessment,
    IntakeWizard,
}

impl FormType {
    pub const ALL: [FormType; 4] = [
        FormType::NewConsultation,
        FormType::FamilyHistory,
        FormType::MetabolicAssessment,
        FormType::IntakeWizard,
    ];

    /// Key used for webhook lookup, draft storage and `_meta.formType`.
    pub fn key(self) -> &'static str {
        match self {
            FormType::NewConsultation => "newConsultation",
            FormType::FamilyHistory => "familyHistory",
            FormType::MetabolicAssessment => "metabolicAssessment",
            FormType::IntakeWizard => "intakeWizard",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FormType::NewConsultation => "New Consultation Checklist",
            FormType::FamilyHistory => "Family History Questionnaire",
            FormType::MetabolicAssessment => "Metabolic Assessment Form",
            FormType::IntakeWizard => "Complete Intake Wizard",
        }
    }

    pub fn draft_key(self) -> String {
        format!("healthplex_draft_{}", self.key())
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newConsultation" | "consultation" | "new-consultation" => Ok(FormType::NewConsultation),
            "familyHistory" | "family-history" => Ok(FormType::FamilyHistory),
            "metabolicAssessment" | "metabolic-assessment" | "metabolic" => {
                Ok(FormType::MetabolicAssessment)
            }
            "intakeWizard" | "intake-wizard" | "combined-wizard" | "wizard" => {
                Ok(FormType::IntakeWizard)
            }
            other => Err(CoreError::UnknownFormType(other.to_string())),
        }
    }
}
