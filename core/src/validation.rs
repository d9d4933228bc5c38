//! Field constraints enforced before anything is written.

use crate::error::{ValidationError, ValidationErrorKind};
use crate::types::{NewTodo, TodoPatch};

pub const TASK_NAME_MIN_CHARS: usize = 4;
pub const TASK_NAME_MAX_CHARS: usize = 50;

/// Checks `4 <= chars <= 50` and that no NUL is present. Length is counted
/// in characters, not bytes, and the value is never truncated to fit.
pub fn validate_task_name(task_name: &str) -> Result<(), ValidationError> {
    let field = "task_name";
    let actual = task_name.chars().count();

    let kind = if actual == 0 {
        ValidationErrorKind::Required
    } else if task_name.contains('\0') {
        // SQLite's length() stops at the first NUL.
        ValidationErrorKind::NullCharacter
    } else if actual < TASK_NAME_MIN_CHARS {
        ValidationErrorKind::TooShort {
            min: TASK_NAME_MIN_CHARS,
            actual,
        }
    } else if actual > TASK_NAME_MAX_CHARS {
        ValidationErrorKind::TooLong {
            max: TASK_NAME_MAX_CHARS,
            actual,
        }
    } else {
        return Ok(());
    };

    Err(ValidationError { field, kind })
}

pub fn validate_new(new: &NewTodo) -> Result<(), ValidationError> {
    validate_task_name(&new.task_name)
}

pub fn validate_patch(patch: &TodoPatch) -> Result<(), ValidationError> {
    match patch.task_name.as_deref() {
        Some(task_name) => validate_task_name(task_name),
        None => Ok(()),
    }
}
