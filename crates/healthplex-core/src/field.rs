use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A single collected form value.
///
/// Serialized untagged so the flat map reads like the raw form data a
/// webhook consumer expects: strings, booleans and string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "flag",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }

    /// Whether the value carries any user input.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }

    fn sanitized(&self) -> FieldValue {
        match self {
            FieldValue::Flag(b) => FieldValue::Flag(*b),
            FieldValue::Text(s) => FieldValue::Text(sanitize_string(s)),
            FieldValue::List(items) => {
                FieldValue::List(items.iter().map(|s| sanitize_string(s)).collect())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Replace every double quote with a single quote.
///
/// The webhook pipeline re-interpolates values into JSON templates, so a
/// height like `6'2"` must arrive as `6'2'`.
pub fn sanitize_string(value: &str) -> String {
    value.replace('"', "'")
}

/// Parse the leading integer of a string the way form inputs are read:
/// leading whitespace and an optional sign are accepted, trailing garbage
/// is ignored, and a string without leading digits yields `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Whether a field name is a metabolic questionnaire item (`q<digits>`).
pub fn is_question_field(name: &str) -> bool {
    name.strip_prefix('q')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Flat field name -> value map, produced fresh per submission.
///
/// Keys are kept sorted so two serializations of the same data are
/// byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatFormData {
    fields: BTreeMap<String, FieldValue>,
}

impl FlatFormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text value of a field. `None` when the field is absent.
    pub fn text(&self, name: &str) -> Result<Option<&str>, CoreError> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(FieldValue::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_error(name, "text", other)),
        }
    }

    /// Text value, with absent fields read as `""`.
    pub fn text_or_empty(&self, name: &str) -> Result<&str, CoreError> {
        Ok(self.text(name)?.unwrap_or(""))
    }

    /// Text value when present and not blank.
    pub fn non_empty_text(&self, name: &str) -> Result<Option<&str>, CoreError> {
        Ok(self.text(name)?.filter(|s| !s.is_empty()))
    }

    /// Checkbox state. Absent checkboxes read as unchecked.
    pub fn flag(&self, name: &str) -> Result<bool, CoreError> {
        match self.fields.get(name) {
            None => Ok(false),
            Some(FieldValue::Flag(b)) => Ok(*b),
            Some(other) => Err(type_error(name, "flag", other)),
        }
    }

    /// Leading-integer parse of a text field; absent or unparseable is `None`.
    pub fn int(&self, name: &str) -> Result<Option<i64>, CoreError> {
        Ok(self.text(name)?.and_then(parse_leading_int))
    }

    /// Copy of the data with every string value sanitized.
    pub fn sanitized(&self) -> FlatFormData {
        FlatFormData {
            fields: self
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.sanitized()))
                .collect(),
        }
    }

    /// Copy of the data without the metabolic questionnaire items.
    pub fn without_questions(&self) -> FlatFormData {
        FlatFormData {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| !is_question_field(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(String, FieldValue)> for FlatFormData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        FlatFormData {
            fields: iter.into_iter().collect(),
        }
    }
}

fn type_error(name: &str, expected: &'static str, found: &FieldValue) -> CoreError {
    CoreError::FieldType {
        field: name.to_string(),
        expected,
        found: found.kind_name(),
    }
}
