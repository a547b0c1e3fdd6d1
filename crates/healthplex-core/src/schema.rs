//! Typed form schema: every field a form knows about, with its control kind,
//! whether it is required, and the wizard step that renders it.

use crate::choices::{
    self, BETTER_OUTCOMES, FEAR_AREAS, FEAR_CONDITIONS, IMPROVEMENTS, PAST_CARE,
};
use crate::collect::ControlKind;
use crate::family::{
    custom_condition_member_field, custom_condition_name_field, FamilyCondition, FamilySlot,
    MAX_CUSTOM_CONDITIONS,
};
use crate::form_type::FormType;

/// Wizard step numbers. Standalone forms reuse them to group fields.
pub mod step {
    pub const PATIENT_INFORMATION: u8 = 1;
    pub const HEALTH_CONCERNS: u8 = 2;
    pub const COMMITMENT_AND_VISION: u8 = 3;
    pub const FAMILY_HISTORY: u8 = 4;
    pub const DIGESTIVE_HEALTH: u8 = 5;
    pub const METABOLISM_AND_ADRENAL: u8 = 6;
    pub const HORMONES: u8 = 7;
    pub const REVIEW_AND_SUBMIT: u8 = 8;

    pub const TOTAL: u8 = 8;

    pub fn name(step: u8) -> &'static str {
        match step {
            PATIENT_INFORMATION => "Patient Information",
            HEALTH_CONCERNS => "Health Concerns",
            COMMITMENT_AND_VISION => "Commitment & Vision",
            FAMILY_HISTORY => "Family History",
            DIGESTIVE_HEALTH => "Digestive Health",
            METABOLISM_AND_ADRENAL => "Metabolism & Adrenal",
            HORMONES => "Hormones",
            REVIEW_AND_SUBMIT => "Review & Submit",
            _ => "",
        }
    }
}

/// Highest metabolic questionnaire item id.
pub const LAST_QUESTION: u16 = 135;

/// Item 43 is reserved on the printed questionnaire and never rendered.
pub const RESERVED_QUESTION: u16 = 43;

pub const SPOUSE_ATTENDANCE_CONFIRM: &str = "spouseAttendanceConfirm";
pub const WIZARD_DURATION: &str = "_wizardDuration";

pub fn question_field(id: u16) -> String {
    format!("q{id}")
}

/// One known form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ControlKind,
    pub required: bool,
    pub step: u8,
}

/// The set of fields a form type collects.
#[derive(Debug, Clone)]
pub struct FormSchema {
    form_type: FormType,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn for_form(form_type: FormType) -> Self {
        let mut b = SchemaBuilder::default();
        match form_type {
            FormType::NewConsultation => {
                patient_information(&mut b);
                health_concerns(&mut b);
                commitment_and_vision(&mut b, false);
            }
            FormType::FamilyHistory => {
                b.step = step::PATIENT_INFORMATION;
                contact_names(&mut b);
                b.field("email", ControlKind::Email, false);
                b.field("phone", ControlKind::Tel, false);
                family_history(&mut b);
            }
            FormType::MetabolicAssessment => {
                b.step = step::PATIENT_INFORMATION;
                b.field("name", ControlKind::Text, true);
                b.field("date", ControlKind::Date, false);
                metabolic(&mut b);
            }
            FormType::IntakeWizard => {
                patient_information(&mut b);
                health_concerns(&mut b);
                commitment_and_vision(&mut b, true);
                family_history(&mut b);
                metabolic(&mut b);
                lifestyle(&mut b);
            }
        }
        FormSchema {
            form_type,
            fields: b.fields,
        }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn checkboxes(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(|f| f.kind == ControlKind::Checkbox)
    }

    pub fn step_fields(&self, step: u8) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.step == step)
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[derive(Default)]
struct SchemaBuilder {
    step: u8,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    fn field(&mut self, name: impl Into<String>, kind: ControlKind, required: bool) {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required,
            step: self.step,
        });
    }

    fn optional(&mut self, names: &[&str], kind: ControlKind) {
        for name in names {
            self.field(*name, kind, false);
        }
    }

    fn choice_set(&mut self, choices: &[choices::Choice]) {
        for choice in choices {
            self.field(choice.field, ControlKind::Checkbox, false);
        }
    }
}

fn contact_names(b: &mut SchemaBuilder) {
    b.field("firstName", ControlKind::Text, true);
    b.field("middleName", ControlKind::Text, false);
    b.field("lastName", ControlKind::Text, true);
}

fn patient_information(b: &mut SchemaBuilder) {
    b.step = step::PATIENT_INFORMATION;
    contact_names(b);
    b.field("email", ControlKind::Email, true);
    b.field("phone", ControlKind::Tel, true);
    b.optional(&["street", "city", "state", "zip"], ControlKind::Text);
    b.field("birthDate", ControlKind::Date, false);
    b.field("maritalStatus", ControlKind::Select, false);
    b.optional(
        &[
            "occupation",
            "employer",
            "currentPhysician",
            "physicianCity",
            "referredBy",
        ],
        ControlKind::Text,
    );
}

fn health_concerns(b: &mut SchemaBuilder) {
    b.step = step::HEALTH_CONCERNS;
    b.optional(
        &[
            "complaint1",
            "complaint2",
            "complaint3",
            "complaint4",
            "problemDuration",
        ],
        ControlKind::Text,
    );
    b.field("otherComplaints", ControlKind::TextArea, false);
    b.optional(&["height", "weight"], ControlKind::Text);
    b.choice_set(IMPROVEMENTS);
    b.optional(
        &[
            "triedNotWorked",
            "discouraged",
            "worstFeeling",
            "bodyFunctions",
            "impact_work",
            "impact_family",
            "impact_hobbies",
            "impact_life",
        ],
        ControlKind::TextArea,
    );
    b.field("feelsOlder", ControlKind::Select, false);
    b.field(choices::VISIT_PURPOSE, ControlKind::Radio, false);
    b.field(choices::VISIT_PURPOSE_OTHER_TEXT, ControlKind::Text, false);
    b.choice_set(PAST_CARE);
    b.field(choices::PAST_CARE_OTHER, ControlKind::Checkbox, false);
    b.field(choices::PAST_CARE_OTHER_TEXT, ControlKind::Text, false);
    b.field("previousMethodsResults", ControlKind::TextArea, false);
}

fn commitment_and_vision(b: &mut SchemaBuilder, confirm_spouse: bool) {
    b.step = step::COMMITMENT_AND_VISION;
    b.choice_set(FEAR_AREAS);
    b.choice_set(FEAR_CONDITIONS);
    b.field(choices::FEAR_CONDITION_OTHER, ControlKind::Checkbox, false);
    b.field(choices::FEAR_CONDITION_OTHER_TEXT, ControlKind::Text, false);
    b.field("futureWithoutHelp", ControlKind::TextArea, false);
    b.choice_set(BETTER_OUTCOMES);
    b.optional(
        &[
            "threeYearVision",
            "barriers",
            "overcomingBarriers",
            "strengths",
        ],
        ControlKind::TextArea,
    );
    b.optional(&["importance", "coachable", "prepared"], ControlKind::Radio);
    if confirm_spouse {
        b.field(SPOUSE_ATTENDANCE_CONFIRM, ControlKind::Checkbox, true);
    }
}

fn family_history(b: &mut SchemaBuilder) {
    b.step = step::FAMILY_HISTORY;
    for slot in FamilySlot::ALL {
        b.field(slot.age_field(), ControlKind::Number, false);
        b.field(slot.death_age_field(), ControlKind::Number, false);
        for condition in FamilyCondition::ALL {
            b.field(condition.field(slot), ControlKind::Checkbox, false);
        }
    }
    for index in 1..=MAX_CUSTOM_CONDITIONS {
        b.field(custom_condition_name_field(index), ControlKind::Text, false);
        for slot in FamilySlot::ALL {
            b.field(
                custom_condition_member_field(index, slot),
                ControlKind::Checkbox,
                false,
            );
        }
    }
}

fn metabolic(b: &mut SchemaBuilder) {
    b.step = step::DIGESTIVE_HEALTH;
    b.field("age", ControlKind::Number, false);
    b.field("sex", ControlKind::Radio, false);
    b.field("gallbladder_removed", ControlKind::Radio, false);
    for id in (1..=LAST_QUESTION).filter(|id| *id != RESERVED_QUESTION) {
        b.step = match id {
            1..=42 => step::DIGESTIVE_HEALTH,
            44..=93 => step::METABOLISM_AND_ADRENAL,
            _ => step::HORMONES,
        };
        b.field(question_field(id), ControlKind::Radio, false);
    }
}

fn lifestyle(b: &mut SchemaBuilder) {
    b.step = step::REVIEW_AND_SUBMIT;
    b.optional(
        &[
            "alcohol_per_week",
            "caffeine_per_day",
            "eat_out_per_week",
            "workout_per_week",
            "stress_level",
        ],
        ControlKind::Number,
    );
    b.field("smoke", ControlKind::Radio, false);
    b.optional(
        &[
            "worst_food_1",
            "worst_food_2",
            "worst_food_3",
            "healthy_food_1",
            "healthy_food_2",
            "healthy_food_3",
        ],
        ControlKind::Text,
    );
    b.optional(&["medications", "supplements"], ControlKind::TextArea);
    b.field(WIZARD_DURATION, ControlKind::Hidden, false);
}
