//! Error types for the todo store.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because the HTTP layer
//! maps them to a 404 page and a form error respectively. Everything else is
//! a backend failure and is reported as such.

use std::fmt;

use thiserror::Error;

use crate::types::TodoId;

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The value was missing or empty.
    Required,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    /// The value contained a NUL character.
    NullCharacter,
}

/// A field-level validation failure. `Display` yields the message shown
/// next to the field in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationErrorKind::Required => write!(f, "This field is required."),
            ValidationErrorKind::TooShort { min, actual } => write!(
                f,
                "Ensure this value has at least {min} characters (it has {actual})."
            ),
            ValidationErrorKind::TooLong { max, actual } => write!(
                f,
                "Ensure this value has at most {max} characters (it has {actual})."
            ),
            ValidationErrorKind::NullCharacter => write!(f, "Null characters are not allowed."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed validation; nothing was written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No item with this id exists.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {found} is newer than supported {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// The store's lock was poisoned by a panicking writer.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A persisted row could not be decoded into a `TodoItem`.
    #[error("invalid stored todo: {0}")]
    InvalidData(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_message_matches_form_wording() {
        let err = ValidationError {
            field: "task_name",
            kind: ValidationErrorKind::Required,
        };
        assert_eq!(err.to_string(), "This field is required.");
    }

    #[test]
    fn length_messages_report_actual_length() {
        let short = ValidationError {
            field: "task_name",
            kind: ValidationErrorKind::TooShort { min: 4, actual: 3 },
        };
        assert_eq!(
            short.to_string(),
            "Ensure this value has at least 4 characters (it has 3)."
        );

        let long = ValidationError {
            field: "task_name",
            kind: ValidationErrorKind::TooLong { max: 50, actual: 51 },
        };
        assert_eq!(
            long.to_string(),
            "Ensure this value has at most 50 characters (it has 51)."
        );
    }

    #[test]
    fn null_character_message() {
        let err = ValidationError {
            field: "task_name",
            kind: ValidationErrorKind::NullCharacter,
        };
        assert_eq!(err.to_string(), "Null characters are not allowed.");
    }

    #[test]
    fn store_error_wraps_field_message() {
        let err = StoreError::from(ValidationError {
            field: "task_name",
            kind: ValidationErrorKind::Required,
        });
        assert_eq!(err.to_string(), "validation failed: This field is required.");
        assert!(!err.is_not_found());
        assert!(StoreError::NotFound(TodoId::new(3)).is_not_found());
    }
}
