use healthplex_core::schema::{step, FormSchema};
use healthplex_core::validate::{
    is_valid_email, is_valid_phone, validate_form, validate_step, EMAIL_MESSAGE, PHONE_MESSAGE,
    REQUIRED_MESSAGE,
};
use healthplex_core::{FlatFormData, FormType};

fn patient(email: &str, phone: &str) -> FlatFormData {
    let mut data = FlatFormData::new();
    data.insert("firstName", "Ada");
    data.insert("lastName", "Lovelace");
    data.insert("email", email);
    data.insert("phone", phone);
    data
}

#[test]
fn email_shape() {
    assert!(is_valid_email("ada@example.com"));
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("ada@example"));
    assert!(!is_valid_email("ada example@x.com"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("ada@@example.com"));
    assert!(!is_valid_email("ada@.com"));
    assert!(is_valid_email("a.b+tag@mail.example.org"));
    assert!(!is_valid_email("ada@example."));
}

#[test]
fn phone_needs_ten_formatting_or_digit_characters() {
    assert!(is_valid_phone("(555) 123-4567"));
    assert!(is_valid_phone("+1 555.123.4567"));
    assert!(is_valid_phone("555-123-456"));
    assert!(!is_valid_phone("555-1234"));
    assert!(!is_valid_phone("call 5551234567"));
    assert!(!is_valid_phone("555123456x7"));
    assert!(!is_valid_phone("\u{0665}\u{0665}\u{0665}1234567"));
}

#[test]
fn complete_first_step_passes() {
    let schema = FormSchema::for_form(FormType::IntakeWizard);
    let data = patient("ada@example.com", "555 123 4567");
    assert!(validate_step(&schema, &data, step::PATIENT_INFORMATION).is_empty());
}

#[test]
fn missing_required_fields_are_reported() {
    let schema = FormSchema::for_form(FormType::NewConsultation);
    let mut data = patient("", "");
    data.insert("lastName", "   ");

    let errors = validate_form(&schema, &data);
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["lastName", "email", "phone"]);
    assert!(errors.iter().all(|e| e.message == REQUIRED_MESSAGE));
}

#[test]
fn malformed_contact_fields_are_reported() {
    let schema = FormSchema::for_form(FormType::NewConsultation);
    let data = patient("not-an-email", "12345");

    let errors = validate_form(&schema, &data);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].message, EMAIL_MESSAGE);
    assert_eq!(errors[1].message, PHONE_MESSAGE);
}

#[test]
fn required_checkbox_must_be_checked() {
    let schema = FormSchema::for_form(FormType::IntakeWizard);
    let mut data = FlatFormData::new();
    data.insert("spouseAttendanceConfirm", false);

    let errors = validate_step(&schema, &data, step::COMMITMENT_AND_VISION);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "spouseAttendanceConfirm");

    data.insert("spouseAttendanceConfirm", true);
    assert!(validate_step(&schema, &data, step::COMMITMENT_AND_VISION).is_empty());
}

#[test]
fn optional_email_on_family_form_may_be_blank() {
    let schema = FormSchema::for_form(FormType::FamilyHistory);
    let mut data = FlatFormData::new();
    data.insert("firstName", "Ada");
    data.insert("lastName", "Lovelace");
    data.insert("email", "");
    assert!(validate_form(&schema, &data).is_empty());
}
