use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubcueError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubcueError {
    #[error("malformed time '{input}': {reason}")]
    MalformedTime { input: String, reason: String },

    #[error("invalid time range: start {start:?} is after end {end:?}")]
    InvalidRange { start: Duration, end: Duration },

    #[error("field '{field}' cannot be encoded: {value:?}")]
    FieldEncoding { field: &'static str, value: String },

    #[error("field '{field}' is not supported by {standard} and was dropped")]
    UnsupportedField {
        field: &'static str,
        standard: &'static str,
    },

    #[error("{0}")]
    Parse(String),
}

impl SubcueError {
    pub(crate) fn malformed_time(input: &str, reason: impl Into<String>) -> Self {
        SubcueError::MalformedTime {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn field_encoding(field: &'static str, value: &str) -> Self {
        SubcueError::FieldEncoding {
            field,
            value: value.to_string(),
        }
    }
}
