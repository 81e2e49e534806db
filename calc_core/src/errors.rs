//! # Error Types
//!
//! Structured error types for calc_core. The conversion engine has exactly
//! one failure mode, [`CalcError::InvalidUnit`], which signals caller misuse:
//! a unit code that is not in the requested category's table. The remaining
//! variants belong to the calculators and the settings loader.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_distance(distance: f64) -> CalcResult<()> {
//!     if distance < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "distance",
//!             distance.to_string(),
//!             "Distance cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_distance(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for conversion and calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A unit code is not a member of the category's unit table
    #[error("Invalid unit '{unit}' for category '{category}'")]
    InvalidUnit { category: String, unit: String },

    /// A category name could not be recognized
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidUnit error
    pub fn invalid_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::InvalidUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        CalcError::UnknownCategory { name: name.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors that indicate a bug in the caller rather than bad
    /// user input. Unit codes are expected to come from the same tables the
    /// engine owns, so an unknown one is an integration error.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, CalcError::InvalidUnit { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidUnit { .. } => "INVALID_UNIT",
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
