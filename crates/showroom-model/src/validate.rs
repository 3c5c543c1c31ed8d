//! Result-typed field validation.

use serde::{Deserialize, Serialize};

/// One field-level validation failure, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Schema field name the message refers to.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Build an error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation that consumes the raw record and returns either the
/// normalized record (trimmed strings, lower-cased email, ...) or every
/// field error in schema field order. No error crosses a component
/// boundary as a panic or exception.
pub trait Validate: Sized {
    /// Validate and normalize.
    ///
    /// # Errors
    /// All field-level failures, in schema field order.
    fn validated(self) -> Result<Self, Vec<FieldError>>;
}

/// Shared helper: a required, trimmed string of at least `min_len`
/// characters. Returns the normalized value or a message.
pub(crate) fn required_text(
    value: &str,
    label: &str,
    min_len: usize,
) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{label} is required"));
    }
    if trimmed.chars().count() < min_len {
        return Err(format!("{label} must be at least {min_len} characters"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::required_text;

    #[test]
    fn required_text_trims_and_checks_length() {
        assert_eq!(required_text("  Ana  ", "Name", 2), Ok("Ana".to_string()));
        assert_eq!(
            required_text("   ", "Name", 2),
            Err("Name is required".to_string())
        );
        assert_eq!(
            required_text("a", "Name", 2),
            Err("Name must be at least 2 characters".to_string())
        );
    }
}
