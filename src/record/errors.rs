//! Record conversion errors

use thiserror::Error;

/// Result type for record conversions
pub type RecordResult<T> = Result<T, RecordError>;

/// A record representation could not be turned into a `Book`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The representation is not a JSON object
    #[error("record must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A required key is absent
    #[error("record is missing required field '{0}'")]
    MissingField(&'static str),

    /// A key is present but holds the wrong kind of value
    #[error("field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

impl RecordError {
    /// The field this error is about, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::NotAnObject(_) => None,
            RecordError::MissingField(field) => Some(field),
            RecordError::TypeMismatch { field, .. } => Some(field),
        }
    }
}
