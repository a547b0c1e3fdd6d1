//! Family history vocabulary: relation slots, tracked conditions, and the
//! field names that connect them to the flat form data.

use serde::{Deserialize, Serialize};

/// Number of free-text custom conditions on the family history grid.
pub const MAX_CUSTOM_CONDITIONS: usize = 3;

/// The fixed relation slots of the family history grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FamilySlot {
    #[serde(rename = "mother")]
    Mother,
    #[serde(rename = "father")]
    Father,
    #[serde(rename = "brother")]
    Brother,
    #[serde(rename = "sister")]
    Sister,
    #[serde(rename = "child1")]
    Child1,
    #[serde(rename = "child2")]
    Child2,
    #[serde(rename = "child3")]
    Child3,
    #[serde(rename = "child4")]
    Child4,
    #[serde(rename = "maGma")]
    MaternalGrandmother,
    #[serde(rename = "maGpa")]
    MaternalGrandfather,
    #[serde(rename = "paGma")]
    PaternalGrandmother,
    #[serde(rename = "paGpa")]
    PaternalGrandfather,
    #[serde(rename = "aunt")]
    Aunt,
    #[serde(rename = "uncle")]
    Uncle,
}

impl FamilySlot {
    pub const ALL: [FamilySlot; 14] = [
        FamilySlot::Mother,
        FamilySlot::Father,
        FamilySlot::Brother,
        FamilySlot::Sister,
        FamilySlot::Child1,
        FamilySlot::Child2,
        FamilySlot::Child3,
        FamilySlot::Child4,
        FamilySlot::MaternalGrandmother,
        FamilySlot::MaternalGrandfather,
        FamilySlot::PaternalGrandmother,
        FamilySlot::PaternalGrandfather,
        FamilySlot::Aunt,
        FamilySlot::Uncle,
    ];

    /// Suffix used in field names and payload keys.
    pub fn key(self) -> &'static str {
        match self {
            FamilySlot::Mother => "mother",
            FamilySlot::Father => "father",
            FamilySlot::Brother => "brother",
            FamilySlot::Sister => "sister",
            FamilySlot::Child1 => "child1",
            FamilySlot::Child2 => "child2",
            FamilySlot::Child3 => "child3",
            FamilySlot::Child4 => "child4",
            FamilySlot::MaternalGrandmother => "maGma",
            FamilySlot::MaternalGrandfather => "maGpa",
            FamilySlot::PaternalGrandmother => "paGma",
            FamilySlot::PaternalGrandfather => "paGpa",
            FamilySlot::Aunt => "aunt",
            FamilySlot::Uncle => "uncle",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FamilySlot::Mother => "Mother",
            FamilySlot::Father => "Father",
            FamilySlot::Brother => "Brother",
            FamilySlot::Sister => "Sister",
            FamilySlot::Child1 => "Child 1",
            FamilySlot::Child2 => "Child 2",
            FamilySlot::Child3 => "Child 3",
            FamilySlot::Child4 => "Child 4",
            FamilySlot::MaternalGrandmother => "Maternal Grandmother",
            FamilySlot::MaternalGrandfather => "Maternal Grandfather",
            FamilySlot::PaternalGrandmother => "Paternal Grandmother",
            FamilySlot::PaternalGrandfather => "Paternal Grandfather",
            FamilySlot::Aunt => "Aunt",
            FamilySlot::Uncle => "Uncle",
        }
    }

    pub fn age_field(self) -> String {
        format!("age_{}", self.key())
    }

    pub fn death_age_field(self) -> String {
        format!("death_{}", self.key())
    }

    pub fn from_key(key: &str) -> Option<FamilySlot> {
        FamilySlot::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// Conditions tracked for every family slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FamilyCondition {
    Cancer,
    HeartDisease,
    Hypertension,
    Obesity,
    Diabetes,
    Stroke,
    Autoimmune,
    Arthritis,
    KidneyDisease,
    Thyroid,
    Seizures,
    Psychiatric,
    Anxiety,
    Depression,
    Asthma,
    Allergies,
    Eczema,
    Adhd,
    Autism,
    Ibs,
    Dementia,
    SubstanceAbuse,
    Genetic,
    Celiac,
}

impl FamilyCondition {
    pub const ALL: [FamilyCondition; 24] = [
        FamilyCondition::Cancer,
        FamilyCondition::HeartDisease,
        FamilyCondition::Hypertension,
        FamilyCondition::Obesity,
        FamilyCondition::Diabetes,
        FamilyCondition::Stroke,
        FamilyCondition::Autoimmune,
        FamilyCondition::Arthritis,
        FamilyCondition::KidneyDisease,
        FamilyCondition::Thyroid,
        FamilyCondition::Seizures,
        FamilyCondition::Psychiatric,
        FamilyCondition::Anxiety,
        FamilyCondition::Depression,
        FamilyCondition::Asthma,
        FamilyCondition::Allergies,
        FamilyCondition::Eczema,
        FamilyCondition::Adhd,
        FamilyCondition::Autism,
        FamilyCondition::Ibs,
        FamilyCondition::Dementia,
        FamilyCondition::SubstanceAbuse,
        FamilyCondition::Genetic,
        FamilyCondition::Celiac,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FamilyCondition::Cancer => "cancer",
            FamilyCondition::HeartDisease => "heartDisease",
            FamilyCondition::Hypertension => "hypertension",
            FamilyCondition::Obesity => "obesity",
            FamilyCondition::Diabetes => "diabetes",
            FamilyCondition::Stroke => "stroke",
            FamilyCondition::Autoimmune => "autoimmune",
            FamilyCondition::Arthritis => "arthritis",
            FamilyCondition::KidneyDisease => "kidneyDisease",
            FamilyCondition::Thyroid => "thyroid",
            FamilyCondition::Seizures => "seizures",
            FamilyCondition::Psychiatric => "psychiatric",
            FamilyCondition::Anxiety => "anxiety",
            FamilyCondition::Depression => "depression",
            FamilyCondition::Asthma => "asthma",
            FamilyCondition::Allergies => "allergies",
            FamilyCondition::Eczema => "eczema",
            FamilyCondition::Adhd => "adhd",
            FamilyCondition::Autism => "autism",
            FamilyCondition::Ibs => "ibs",
            FamilyCondition::Dementia => "dementia",
            FamilyCondition::SubstanceAbuse => "substanceAbuse",
            FamilyCondition::Genetic => "genetic",
            FamilyCondition::Celiac => "celiac",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FamilyCondition::Cancer => "Cancer",
            FamilyCondition::HeartDisease => "Heart Disease",
            FamilyCondition::Hypertension => "Hypertension",
            FamilyCondition::Obesity => "Obesity",
            FamilyCondition::Diabetes => "Diabetes",
            FamilyCondition::Stroke => "Stroke",
            FamilyCondition::Autoimmune => "Autoimmune Disease",
            FamilyCondition::Arthritis => "Arthritis",
            FamilyCondition::KidneyDisease => "Kidney Disease",
            FamilyCondition::Thyroid => "Thyroid Problems",
            FamilyCondition::Seizures => "Seizures/Epilepsy",
            FamilyCondition::Psychiatric => "Psychiatric Disorders",
            FamilyCondition::Anxiety => "Anxiety",
            FamilyCondition::Depression => "Depression",
            FamilyCondition::Asthma => "Asthma",
            FamilyCondition::Allergies => "Allergies",
            FamilyCondition::Eczema => "Eczema",
            FamilyCondition::Adhd => "ADHD",
            FamilyCondition::Autism => "Autism",
            FamilyCondition::Ibs => "Irritable Bowel Syndrome",
            FamilyCondition::Dementia => "Dementia",
            FamilyCondition::SubstanceAbuse => "Substance Abuse",
            FamilyCondition::Genetic => "Genetic Disorders",
            FamilyCondition::Celiac => "Celiac Disease",
        }
    }

    /// Checkbox name for this condition on a given slot, e.g. `cancer_mother`.
    pub fn field(self, slot: FamilySlot) -> String {
        format!("{}_{}", self.key(), slot.key())
    }
}

/// Name field of custom condition `index` (1-based), e.g. `other2_name`.
pub fn custom_condition_name_field(index: usize) -> String {
    format!("other{index}_name")
}

/// Checkbox marking a slot as affected by custom condition `index`.
pub fn custom_condition_member_field(index: usize, slot: FamilySlot) -> String {
    format!("other{index}_{}", slot.key())
}

/// Vital status of a relative. Age and age at death are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VitalStatus {
    #[default]
    Unknown,
    Living { age: String },
    Deceased { death_age: String },
}

impl VitalStatus {
    /// Resolve the two raw age fields into a status.
    ///
    /// Both fields can only be populated together when a draft bypassed the
    /// form's exclusivity rule; age at death wins in that case.
    pub fn resolve(age: Option<&str>, death_age: Option<&str>) -> VitalStatus {
        let age = age.map(str::trim).filter(|s| !s.is_empty());
        let death_age = death_age.map(str::trim).filter(|s| !s.is_empty());
        match (age, death_age) {
            (_, Some(d)) => VitalStatus::Deceased {
                death_age: d.to_string(),
            },
            (Some(a), None) => VitalStatus::Living { age: a.to_string() },
            (None, None) => VitalStatus::Unknown,
        }
    }

    pub fn age(&self) -> Option<&str> {
        match self {
            VitalStatus::Living { age } => Some(age),
            _ => None,
        }
    }

    pub fn death_age(&self) -> Option<&str> {
        match self {
            VitalStatus::Deceased { death_age } => Some(death_age),
            _ => None,
        }
    }

    pub fn is_deceased(&self) -> bool {
        matches!(self, VitalStatus::Deceased { .. })
    }
}
