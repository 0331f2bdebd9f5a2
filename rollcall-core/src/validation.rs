//! Input normalization and required-field validation
//!
//! Every caller-supplied identifier passes through [`require_field`] at the
//! service boundary, so all stored values and all comparisons range over
//! trimmed text. This reproduces, as one explicit step, the type-tolerant
//! trim-and-compare the system is specified against.

use crate::error::ValidationError;

/// Normalize a caller-supplied identifier: surrounding whitespace is not
/// significant
pub fn normalize(value: &str) -> String {
    value.trim().to_string()
}

/// Normalize a required field, rejecting values that are empty after
/// trimming
pub fn require_field(name: &str, value: &str) -> Result<String, ValidationError> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return Err(ValidationError::MissingField(name.to_string()));
    }
    Ok(normalized)
}
