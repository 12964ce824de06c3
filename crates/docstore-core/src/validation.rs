//! Validation utilities.

use crate::{DocstoreError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `DocstoreError` on failure.
    fn validate_entity(&self) -> Result<(), DocstoreError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to a `DocstoreError`.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> DocstoreError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    DocstoreError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a string is a plain SQL identifier.
    ///
    /// Table and column names received from configuration are interpolated
    /// into SQL text and must never contain quoting or punctuation.
    pub fn valid_identifier(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new("identifier_empty"));
        }
        if value.len() > 64 {
            return Err(ValidationError::new("identifier_too_long"));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(ValidationError::new("identifier_invalid_characters"));
        }
        if value
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::new("identifier_starts_with_digit"));
        }
        Ok(())
    }
}
