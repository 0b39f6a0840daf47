//! Boundary validation for request payloads
//!
//! Request structs are checked before they are sent so that obviously
//! malformed input never reaches the backend. The limits mirror the
//! constraints the backend enforces on its own DTOs.

use crate::CoreError;

/// Trait for validating outgoing request payloads
pub trait Validate {
    /// Validate the payload
    ///
    /// Returns Ok(()) if valid, or an error naming the offending field
    fn validate(&self) -> Result<(), CoreError>;
}

/// Common validation helpers
pub mod validators {
    use crate::CoreError;
    use chrono::NaiveDate;

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            return Err(CoreError::validation(field, "cannot be empty"));
        }
        Ok(())
    }

    /// Validate a string length in characters (inclusive bounds)
    pub fn validate_length(value: &str, min: usize, max: usize, field: &str) -> Result<(), CoreError> {
        let len = value.trim().chars().count();
        if len < min || len > max {
            return Err(CoreError::validation(
                field,
                format!("must be between {min} and {max} characters (got {len})"),
            ));
        }
        Ok(())
    }

    /// Validate an optional string does not exceed a maximum length
    pub fn validate_max_length(value: Option<&str>, max: usize, field: &str) -> Result<(), CoreError> {
        if let Some(value) = value {
            let len = value.chars().count();
            if len > max {
                return Err(CoreError::validation(
                    field,
                    format!("must be at most {max} characters (got {len})"),
                ));
            }
        }
        Ok(())
    }

    /// Validate that a value is within range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<(), CoreError> {
        if value < min || value > max {
            return Err(CoreError::validation(
                field,
                format!("must be between {min} and {max} (got {value})"),
            ));
        }
        Ok(())
    }

    /// Validate that a period does not end before it starts
    pub fn validate_period(start: NaiveDate, end: NaiveDate, field: &str) -> Result<(), CoreError> {
        if start > end {
            return Err(CoreError::validation(
                field,
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(())
    }
}
