//! Field validation: required fields, email and phone shape.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::collect::ControlKind;
use crate::field::{FieldValue, FlatFormData};
use crate::schema::{FieldSpec, FormSchema};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

/// A validation failure tied to one field, rendered next to its control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate every field of the schema.
pub fn validate_form(schema: &FormSchema, data: &FlatFormData) -> Vec<FieldError> {
    validate_fields(schema.fields().iter(), data)
}

/// Validate only the fields rendered on one wizard step.
pub fn validate_step(schema: &FormSchema, data: &FlatFormData, step: u8) -> Vec<FieldError> {
    validate_fields(schema.step_fields(step), data)
}

fn validate_fields<'a>(
    fields: impl Iterator<Item = &'a FieldSpec>,
    data: &FlatFormData,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for spec in fields {
        if let Some(message) = check_field(spec, data.get(&spec.name)) {
            errors.push(FieldError {
                field: spec.name.clone(),
                message: message.to_string(),
            });
        }
    }
    errors
}

fn check_field(spec: &FieldSpec, value: Option<&FieldValue>) -> Option<&'static str> {
    let filled = value.is_some_and(FieldValue::is_filled);
    if spec.required && !filled {
        return Some(REQUIRED_MESSAGE);
    }

    let Some(FieldValue::Text(text)) = value else {
        return None;
    };
    if text.is_empty() {
        return None;
    }
    match spec.kind {
        ControlKind::Email if !is_valid_email(text) => Some(EMAIL_MESSAGE),
        ControlKind::Tel if !is_valid_phone(text) => Some(PHONE_MESSAGE),
        _ => None,
    }
}

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9\s().+-]{10,}$").ok());

/// `local@domain.tld` shape: one `@`, no whitespace, and a dot in the
/// domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// Ten or more characters, all of them digits, spaces, dots, dashes,
/// parentheses or `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.as_ref().is_some_and(|re| re.is_match(phone))
}
