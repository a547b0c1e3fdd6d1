//! Checkbox groups that represent a semantic choice set, with the display
//! label each checked box contributes.

/// One checkbox of a choice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Key used in the structured payload (e.g. `medications`).
    pub key: &'static str,
    /// Form field name (e.g. `pastCare_medications`).
    pub field: &'static str,
    pub label: &'static str,
}

const fn choice(key: &'static str, field: &'static str, label: &'static str) -> Choice {
    Choice { key, field, label }
}

pub const IMPROVEMENTS: &[Choice] = &[
    choice("digestion", "improvement_digestion", "Digestion"),
    choice("sleep", "improvement_sleep", "Sleep"),
    choice("wellbeing", "improvement_wellbeing", "Wellbeing"),
    choice("energy", "improvement_energy", "Energy"),
];

pub const PAST_CARE: &[Choice] = &[
    choice("medications", "pastCare_medications", "Medications"),
    choice("holistic", "pastCare_holistic", "Holistic"),
    choice("routine", "pastCare_routine", "Routine Medical"),
    choice("vitamins", "pastCare_vitamins", "Vitamins"),
    choice("exercise", "pastCare_exercise", "Exercise"),
    choice("chiropractic", "pastCare_chiropractic", "Chiropractic"),
    choice("diet", "pastCare_diet", "Diet and Nutrition"),
];

/// The "other" box of the past-care group; its label is the free text.
pub const PAST_CARE_OTHER: &str = "pastCare_other";
pub const PAST_CARE_OTHER_TEXT: &str = "pastCareOther";

pub const FEAR_AREAS: &[Choice] = &[
    choice("job", "fear_job", "Job"),
    choice("kids", "fear_kids", "Kids"),
    choice("marriage", "fear_marriage", "Marriage"),
    choice("sleep", "fear_sleep", "Sleep"),
    choice("freedom", "fear_freedom", "Freedom"),
    choice("abilities", "fear_abilities", "Future Abilities"),
    choice("finances", "fear_finances", "Finances"),
    choice("time", "fear_time", "Time"),
];

pub const FEAR_CONDITIONS: &[Choice] = &[
    choice("abilities", "fearCondition_abilities", "Diminished Abilities"),
    choice("surgery", "fearCondition_surgery", "Surgery"),
    choice("stress", "fearCondition_stress", "Stress"),
    choice("arthritis", "fearCondition_arthritis", "Arthritis"),
    choice("weight", "fearCondition_weight", "Weight Gain"),
    choice("cancer", "fearCondition_cancer", "Cancer"),
    choice("heart", "fearCondition_heart", "Heart Disease"),
    choice("diabetes", "fearCondition_diabetes", "Diabetes"),
    choice("depression", "fearCondition_depression", "Depression"),
];

pub const FEAR_CONDITION_OTHER: &str = "fearCondition_other";
pub const FEAR_CONDITION_OTHER_TEXT: &str = "fearConditionOther";

pub const BETTER_OUTCOMES: &[Choice] = &[
    choice("stress", "better_stress", "Diminished Stress"),
    choice("sleep", "better_sleep", "Better Sleep"),
    choice("energy", "better_energy", "More Energy"),
    choice("work", "better_work", "Better Work"),
    choice("esteem", "better_esteem", "Self-Esteem"),
    choice("outlook", "better_outlook", "Better Outlook"),
    choice("confidence", "better_confidence", "Confidence"),
    choice("family", "better_family", "Family"),
];

/// Radio options of `visitPurpose` and their display labels.
pub const VISIT_PURPOSES: &[(&str, &str)] = &[
    ("resolve", "Resolve my immediate problem"),
    ("lifestyle", "Lifestyle program for optimized living"),
    ("both", "Both"),
    ("other", "Other"),
];

pub const VISIT_PURPOSE: &str = "visitPurpose";
pub const VISIT_PURPOSE_OTHER_TEXT: &str = "visitPurposeOther";

pub fn visit_purpose_label(value: &str) -> Option<&'static str> {
    VISIT_PURPOSES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
}
