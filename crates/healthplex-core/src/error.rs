use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown form type: {0}")]
    UnknownFormType(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{field}' is disabled")]
    FieldDisabled { field: String },

    #[error("field '{field}' holds a {found} value, expected {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
