//! Name validation for lists and todos.
//!
//! Inputs are expected to be trimmed already; an empty string after trimming
//! fails the length check.

use thiserror::Error;

use super::list::List;

/// Inclusive bounds on name length, counted in characters.
pub const MIN_NAME_LENGTH: usize = 1;
/// Inclusive upper bound on name length, counted in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// A rejected list or todo name.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The list name is empty or longer than 100 characters.
    #[error("The list name must be between 1 and 100 characters.")]
    ListNameLength,

    /// Another list already carries this exact name.
    #[error("The list name must be unique.")]
    ListNameTaken,

    /// The todo name is empty or longer than 100 characters.
    #[error("Todo must be between 1 and 100 characters.")]
    TodoNameLength,
}

fn has_valid_length(name: &str) -> bool {
    (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name.chars().count())
}

/// Validates a list name against the existing lists.
///
/// The comparison is exact and case-sensitive. The list being renamed is part
/// of `existing`, so keeping the current name is reported as a duplicate.
///
/// # Errors
///
/// Returns [`ValidationError::ListNameLength`] or [`ValidationError::ListNameTaken`].
pub fn validate_list_name(name: &str, existing: &[List]) -> Result<(), ValidationError> {
    if !has_valid_length(name) {
        return Err(ValidationError::ListNameLength);
    }

    if existing.iter().any(|list| list.name == name) {
        return Err(ValidationError::ListNameTaken);
    }

    Ok(())
}

/// Validates a todo name.
///
/// # Errors
///
/// Returns [`ValidationError::TodoNameLength`] when the length is out of range.
pub fn validate_todo_name(name: &str) -> Result<(), ValidationError> {
    if has_valid_length(name) {
        Ok(())
    } else {
        Err(ValidationError::TodoNameLength)
    }
}
