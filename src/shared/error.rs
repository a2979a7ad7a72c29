//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and
//! any client of the API types. They represent failures that can be detected
//! without touching the database, such as malformed request bodies.
//!
//! # Error Categories
//!
//! - `ValidationError` - Request body validation failures
//!
//! # Usage
//!
//! ```rust
//! use blogforge::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::validation("title", "Title cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur wherever the API types are used
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check that `value` holds between `min` and `max` characters.
    pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), Self> {
        let len = value.chars().count();
        if len < min {
            if min == 1 {
                return Err(Self::validation(field, format!("{} cannot be empty", field)));
            }
            return Err(Self::validation(
                field,
                format!("{} must be at least {} characters", field, min),
            ));
        }
        if len > max {
            return Err(Self::validation(
                field,
                format!("{} must be at most {} characters", field, max),
            ));
        }
        Ok(())
    }
}
