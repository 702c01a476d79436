//! Field name validation.
//!
//! Rules are checked in a fixed order and the first violated rule decides
//! the rejection reason, so the user always sees the most basic problem
//! first.

use crate::keywords;
use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static FIELD_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z0-9_]*$").expect("field name pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNameError {
    SpecialCharacters,
    Empty,
    StartsWithUpperCase,
    AlreadyUsed,
    ReservedKeyword,
}

impl fmt::Display for FieldNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FieldNameError::SpecialCharacters => {
                "Your field name cannot contain special characters"
            }
            FieldNameError::Empty => "Your field name cannot be empty",
            FieldNameError::StartsWithUpperCase => {
                "Your field name cannot start with an upper case letter"
            }
            FieldNameError::AlreadyUsed => {
                "Your field name cannot use an already existing field name"
            }
            FieldNameError::ReservedKeyword => {
                "Your field name cannot contain a Java or Angular reserved keyword"
            }
        };
        f.write_str(message)
    }
}

/// Check a candidate field name against the already-used snake_case keys.
/// Pure; entry-time validation covers name legality only, validation-rule
/// checking happens later against the whole field set.
pub fn validate_field_name(
    input: &str,
    used_keys: &[String],
) -> std::result::Result<(), FieldNameError> {
    if !FIELD_NAME_PATTERN.is_match(input) {
        return Err(FieldNameError::SpecialCharacters);
    }
    if input.is_empty() {
        return Err(FieldNameError::Empty);
    }
    if input.chars().next().is_some_and(char::is_uppercase) {
        return Err(FieldNameError::StartsWithUpperCase);
    }
    if input == "id" || used_keys.contains(&input.to_case(Case::Snake)) {
        return Err(FieldNameError::AlreadyUsed);
    }
    if keywords::is_reserved_field_name(input) {
        return Err(FieldNameError::ReservedKeyword);
    }
    Ok(())
}
