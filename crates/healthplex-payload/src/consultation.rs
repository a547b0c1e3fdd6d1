//! Consultation section: demographics, complaints, goals, and the checkbox
//! choice sets expanded into flags, label lists and readable text.

use serde::Serialize;

use healthplex_core::choices::{self, Choice};
use healthplex_core::{FlatFormData, OrderedMap};

use crate::contact::join_non_empty;
use crate::error::PayloadError;

pub const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationSection {
    pub address: Address,
    pub demographics: Demographics,
    pub physician: Physician,
    pub referred_by: String,
    pub complaints: Complaints,
    pub physical_stats: PhysicalStats,
    pub improvements: ChoiceFlags,
    pub history: History,
    pub impact: Impact,
    pub visit_purpose: VisitPurpose,
    pub past_care: PastCare,
    pub fears: Fears,
    pub positive_outcomes: PositiveOutcomes,
    pub commitment: Commitment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub full_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub birth_date: String,
    pub marital_status: String,
    pub occupation: String,
    pub employer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Physician {
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaints {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub quaternary: String,
    pub all_complaints: Vec<String>,
    pub duration: String,
    pub other: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalStats {
    pub height: String,
    pub weight: String,
}

/// A checkbox choice set: one flag per box, then the labels of the checked
/// boxes in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceFlags {
    #[serde(flatten)]
    pub flags: OrderedMap<bool>,
    pub list: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub tried_not_worked: String,
    pub discouraged: String,
    pub worst_feeling: String,
    pub body_functions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub work: String,
    pub family: String,
    pub hobbies: String,
    pub life: String,
    pub feels_older: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitPurpose {
    #[serde(rename = "type")]
    pub kind: String,
    pub other: String,
    /// Display label of the chosen option, or the free text for "other".
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastCare {
    #[serde(flatten)]
    pub flags: OrderedMap<bool>,
    pub other: bool,
    pub other_text: String,
    pub results: String,
    pub list: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fears {
    pub areas: Vec<String>,
    pub areas_text: String,
    pub conditions: Vec<String>,
    pub conditions_text: String,
    pub condition_other: String,
    pub future_without_help: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositiveOutcomes {
    pub improvements: Vec<String>,
    pub improvements_text: String,
    pub three_year_vision: String,
    pub barriers: String,
    pub overcoming_barriers: String,
    pub strengths: String,
}

/// Self-rated commitment, each rating 0 when unanswered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commitment {
    pub importance: i64,
    pub coachable: i64,
    pub prepared: i64,
    /// Mean of the three ratings rounded to one decimal.
    pub average: f64,
}

impl Commitment {
    pub fn new(importance: i64, coachable: i64, prepared: i64) -> Self {
        let sum = importance.saturating_add(coachable).saturating_add(prepared);
        let mean = sum as f64 / 3.0;
        Self {
            importance,
            coachable,
            prepared,
            average: (mean * 10.0).round() / 10.0,
        }
    }
}

/// Labels of the checked boxes of a choice set, in table order.
pub fn checked_labels(data: &FlatFormData, set: &[Choice]) -> Result<Vec<String>, PayloadError> {
    let mut labels = Vec::new();
    for choice in set {
        if data.flag(choice.field)? {
            labels.push(choice.label.to_string());
        }
    }
    Ok(labels)
}

fn choice_flags(data: &FlatFormData, set: &[Choice]) -> Result<OrderedMap<bool>, PayloadError> {
    let mut flags = OrderedMap::new();
    for choice in set {
        flags.insert(choice.key, data.flag(choice.field)?);
    }
    Ok(flags)
}

fn text(data: &FlatFormData, name: &str) -> Result<String, PayloadError> {
    Ok(data.text_or_empty(name)?.to_string())
}

pub fn build(data: &FlatFormData) -> Result<ConsultationSection, PayloadError> {
    let street = data.text_or_empty("street")?;
    let city = data.text_or_empty("city")?;
    let state = data.text_or_empty("state")?;
    let zip = data.text_or_empty("zip")?;
    let address = Address {
        street: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
        full_address: join_non_empty(&[street, city, state, zip], LIST_SEPARATOR),
    };

    let complaint_fields = ["complaint1", "complaint2", "complaint3", "complaint4"];
    let mut all_complaints = Vec::new();
    for field in complaint_fields {
        if let Some(c) = data.non_empty_text(field)? {
            all_complaints.push(c.to_string());
        }
    }
    let complaints = Complaints {
        primary: text(data, "complaint1")?,
        secondary: text(data, "complaint2")?,
        tertiary: text(data, "complaint3")?,
        quaternary: text(data, "complaint4")?,
        all_complaints,
        duration: text(data, "problemDuration")?,
        other: text(data, "otherComplaints")?,
    };

    let improvement_list = checked_labels(data, choices::IMPROVEMENTS)?;
    let improvements = ChoiceFlags {
        flags: choice_flags(data, choices::IMPROVEMENTS)?,
        text: improvement_list.join(LIST_SEPARATOR),
        list: improvement_list,
    };

    let purpose = data.text_or_empty(choices::VISIT_PURPOSE)?;
    let purpose_other = data.text_or_empty(choices::VISIT_PURPOSE_OTHER_TEXT)?;
    let label = match purpose {
        "other" if !purpose_other.is_empty() => purpose_other.to_string(),
        p => choices::visit_purpose_label(p).unwrap_or(p).to_string(),
    };
    let visit_purpose = VisitPurpose {
        kind: purpose.to_string(),
        other: purpose_other.to_string(),
        label,
    };

    let past_care_other = data.flag(choices::PAST_CARE_OTHER)?;
    let past_care_other_text = data.text_or_empty(choices::PAST_CARE_OTHER_TEXT)?;
    let mut past_care_list = checked_labels(data, choices::PAST_CARE)?;
    if past_care_other && !past_care_other_text.is_empty() {
        past_care_list.push(past_care_other_text.to_string());
    }
    let past_care = PastCare {
        flags: choice_flags(data, choices::PAST_CARE)?,
        other: past_care_other,
        other_text: past_care_other_text.to_string(),
        results: text(data, "previousMethodsResults")?,
        text: past_care_list.join(LIST_SEPARATOR),
        list: past_care_list,
    };

    let areas = checked_labels(data, choices::FEAR_AREAS)?;
    let conditions = checked_labels(data, choices::FEAR_CONDITIONS)?;
    let fears = Fears {
        areas_text: areas.join(LIST_SEPARATOR),
        areas,
        conditions_text: conditions.join(LIST_SEPARATOR),
        conditions,
        condition_other: text(data, choices::FEAR_CONDITION_OTHER_TEXT)?,
        future_without_help: text(data, "futureWithoutHelp")?,
    };

    let better = checked_labels(data, choices::BETTER_OUTCOMES)?;
    let positive_outcomes = PositiveOutcomes {
        improvements_text: better.join(LIST_SEPARATOR),
        improvements: better,
        three_year_vision: text(data, "threeYearVision")?,
        barriers: text(data, "barriers")?,
        overcoming_barriers: text(data, "overcomingBarriers")?,
        strengths: text(data, "strengths")?,
    };

    let commitment = Commitment::new(
        data.int("importance")?.unwrap_or(0),
        data.int("coachable")?.unwrap_or(0),
        data.int("prepared")?.unwrap_or(0),
    );

    Ok(ConsultationSection {
        address,
        demographics: Demographics {
            birth_date: text(data, "birthDate")?,
            marital_status: text(data, "maritalStatus")?,
            occupation: text(data, "occupation")?,
            employer: text(data, "employer")?,
        },
        physician: Physician {
            name: text(data, "currentPhysician")?,
            city: text(data, "physicianCity")?,
        },
        referred_by: text(data, "referredBy")?,
        complaints,
        physical_stats: PhysicalStats {
            height: text(data, "height")?,
            weight: text(data, "weight")?,
        },
        improvements,
        history: History {
            tried_not_worked: text(data, "triedNotWorked")?,
            discouraged: text(data, "discouraged")?,
            worst_feeling: text(data, "worstFeeling")?,
            body_functions: text(data, "bodyFunctions")?,
        },
        impact: Impact {
            work: text(data, "impact_work")?,
            family: text(data, "impact_family")?,
            hobbies: text(data, "impact_hobbies")?,
            life: text(data, "impact_life")?,
            feels_older: text(data, "feelsOlder")?,
        },
        visit_purpose,
        past_care,
        fears,
        positive_outcomes,
        commitment,
    })
}
