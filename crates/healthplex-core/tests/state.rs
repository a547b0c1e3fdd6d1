use healthplex_core::schema::FormSchema;
use healthplex_core::state::FormState;
use healthplex_core::{CoreError, FlatFormData, FormType};

fn family_form() -> FormState {
    FormState::new(FormSchema::for_form(FormType::FamilyHistory))
}

#[test]
fn setting_age_clears_and_disables_death_age() {
    let mut form = family_form();
    form.set_value("death_father", "71").unwrap();
    assert!(form.is_disabled("age_father"));

    form.set_value("death_father", "").unwrap();
    assert!(!form.is_disabled("age_father"));

    form.set_value("age_father", "64").unwrap();
    assert!(form.is_disabled("death_father"));
    let data = form.collect();
    assert_eq!(data.text("age_father").unwrap(), Some("64"));
    assert_eq!(data.text("death_father").unwrap(), Some(""));
}

#[test]
fn setting_death_age_clears_and_disables_age() {
    let mut form = family_form();
    form.set_value("age_mother", "58").unwrap();
    form.set_value("age_mother", "").unwrap();
    form.set_value("death_mother", "80").unwrap();

    assert!(form.is_disabled("age_mother"));
    assert!(matches!(
        form.set_value("age_mother", "60"),
        Err(CoreError::FieldDisabled { .. })
    ));
    let data = form.collect();
    assert_eq!(data.text("age_mother").unwrap(), Some(""));
    assert_eq!(data.text("death_mother").unwrap(), Some("80"));
}

#[test]
fn restore_with_both_ages_keeps_death_age() {
    let mut saved = FlatFormData::new();
    saved.insert("age_uncle", "50");
    saved.insert("death_uncle", "52");

    let mut form = family_form();
    form.restore(&saved);

    let data = form.collect();
    assert_eq!(data.text("age_uncle").unwrap(), Some(""));
    assert_eq!(data.text("death_uncle").unwrap(), Some("52"));
    assert!(form.is_disabled("age_uncle"));
}

#[test]
fn restore_reads_legacy_checkbox_strings() {
    let mut saved = FlatFormData::new();
    saved.insert("cancer_aunt", "on");
    saved.insert("not_a_field", "x");

    let mut form = family_form();
    form.restore(&saved);

    let data = form.collect();
    assert!(data.flag("cancer_aunt").unwrap());
    assert!(!data.contains_key("not_a_field"));
}

#[test]
fn other_text_follows_its_checkbox() {
    let mut form = FormState::new(FormSchema::for_form(FormType::NewConsultation));
    assert!(form.is_disabled("pastCareOther"));

    form.set_checked("pastCare_other", true).unwrap();
    form.set_value("pastCareOther", "Acupuncture").unwrap();
    assert_eq!(form.collect().text("pastCareOther").unwrap(), Some("Acupuncture"));

    form.set_checked("pastCare_other", false).unwrap();
    assert!(form.is_disabled("pastCareOther"));
    assert_eq!(form.collect().text("pastCareOther").unwrap(), Some(""));
}

#[test]
fn visit_purpose_other_requires_other_option() {
    let mut form = FormState::new(FormSchema::for_form(FormType::NewConsultation));
    form.set_value("visitPurpose", "other").unwrap();
    form.set_value("visitPurposeOther", "Second opinion").unwrap();

    form.set_value("visitPurpose", "both").unwrap();
    assert!(form.is_disabled("visitPurposeOther"));
    assert_eq!(form.collect().text("visitPurposeOther").unwrap(), Some(""));
}

#[test]
fn unknown_and_mistyped_fields_are_rejected() {
    let mut form = family_form();
    assert!(matches!(
        form.set_value("favouriteColor", "blue"),
        Err(CoreError::UnknownField(_))
    ));
    assert!(matches!(
        form.set_value("cancer_mother", "yes"),
        Err(CoreError::FieldType { .. })
    ));
    assert!(matches!(
        form.set_checked("age_mother", true),
        Err(CoreError::FieldType { .. })
    ));
}

#[test]
fn collected_state_lists_every_checkbox() {
    let form = FormState::new(FormSchema::for_form(FormType::IntakeWizard));
    let data = form.collect();
    for spec in form.schema().checkboxes() {
        assert_eq!(data.flag(&spec.name).unwrap(), false, "{}", spec.name);
        assert!(data.contains_key(&spec.name));
    }
}
