use serde::Serialize;
use thiserror::Error;

/// Domain errors raised by roster commands and report narrowing.
///
/// Aggregation itself never fails; malformed tallies surface as
/// [`IntegrityViolation`] values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

impl TrackerError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}

/// A tally that breaks `taken + missed == total` or the stated rate.
///
/// Reported alongside a summary, never corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityViolation {
    pub subject: String,
    pub detail: String,
}

impl IntegrityViolation {
    pub fn new(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = TrackerError::validation("age", "must be a non-negative integer");
        assert_eq!(err.to_string(), "Invalid age: must be a non-negative integer");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = TrackerError::not_found("patient", 42);
        assert_eq!(err.to_string(), "Entity not found: patient with id 42");
    }
}
