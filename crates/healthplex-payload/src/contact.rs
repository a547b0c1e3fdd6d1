use serde::Serialize;

use healthplex_core::FlatFormData;

use crate::error::PayloadError;

/// Core contact fields the CRM matches on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// From the separate name, email and phone fields.
    pub fn from_fields(data: &FlatFormData) -> Result<Self, PayloadError> {
        let first_name = data.text_or_empty("firstName")?;
        let middle_name = data.text_or_empty("middleName")?;
        let last_name = data.text_or_empty("lastName")?;
        Ok(Self {
            first_name: first_name.to_string(),
            middle_name: middle_name.to_string(),
            last_name: last_name.to_string(),
            full_name: join_non_empty(&[first_name, middle_name, last_name], " "),
            email: data.text_or_empty("email")?.to_string(),
            phone: data.text_or_empty("phone")?.to_string(),
        })
    }

    /// From the metabolic form's single `name` field: the first word is the
    /// first name and the rest is the last name.
    pub fn from_full_name(data: &FlatFormData) -> Result<Self, PayloadError> {
        let name = data.text_or_empty("name")?;
        let mut words = name.split_whitespace();
        let first_name = words.next().unwrap_or("").to_string();
        let last_name = words.collect::<Vec<_>>().join(" ");
        Ok(Self {
            first_name,
            middle_name: String::new(),
            last_name,
            full_name: name.to_string(),
            email: data.text_or_empty("email")?.to_string(),
            phone: data.text_or_empty("phone")?.to_string(),
        })
    }
}

pub(crate) fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
