//! Validation error types

use std::fmt;

/// Validation error for task payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field was not supplied
    Required { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field was sent as `null` but has no null representation
    Null { field: &'static str },

    /// Value could not be parsed (e.g., a non-numeric id)
    InvalidFormat { field: &'static str, reason: String },

    /// Update carried none of the recognized fields
    EmptyPatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Null { field } => write!(f, "{} cannot be null", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::EmptyPatch => write!(f, "No fields to update"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject text PostgreSQL cannot store (`TEXT`/`VARCHAR` forbid NUL).
pub fn reject_nul(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must not contain NUL characters".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 255 characters"
        );
        assert_eq!(
            ValidationError::Required { field: "title" }.to_string(),
            "title is required"
        );
        assert_eq!(ValidationError::EmptyPatch.to_string(), "No fields to update");
    }

    #[test]
    fn nul_characters_rejected() {
        assert!(reject_nul("description", "plain text").is_ok());
        assert_eq!(
            reject_nul("description", "a\0b").unwrap_err().to_string(),
            "description: must not contain NUL characters"
        );
    }
}
