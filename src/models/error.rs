use thiserror::Error;

/// Errors raised by the todo model when an argument violates an invariant.
///
/// Every mutator validates before touching state, so a returned error always
/// leaves the receiver exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),
    #[error("{0} is missing")]
    NullArgument(&'static str),
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{field} cannot be negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },
    #[error("no more todos in this project")]
    EndOfSequence,
    #[error("Invalid due date: {0}")]
    InvalidDate(String),
}

/// Reject an empty string for the named field.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), TodoError> {
    if value.is_empty() {
        return Err(TodoError::EmptyValue(field));
    }
    Ok(())
}
