//! Input validation

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors raised when a supplier or request field is missing, malformed or out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A required text field was empty (after trimming).
    #[error("{field} must not be empty")]
    Empty {
        /// Field name
        field: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("{field} is not a number: {value:?}")]
    NotANumber {
        /// Field name
        field: &'static str,

        /// Raw value as supplied
        value: String,

        /// Underlying parse error
        #[source]
        source: ParseFloatError,
    },

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite {
        /// Field name
        field: &'static str,

        /// Offending value
        value: f64,
    },

    /// A numeric field was outside its permitted range.
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        /// Field name
        field: &'static str,

        /// Offending value
        value: f64,

        /// Human-readable description of the permitted range
        expected: &'static str,
    },
}

/// Trim a text field, rejecting it if nothing is left.
///
/// # Errors
///
/// Returns [`InputError::Empty`] if the trimmed value is empty.
pub fn non_empty(field: &'static str, value: &str) -> Result<String, InputError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }

    Ok(trimmed.to_string())
}

/// Parse a numeric text field.
///
/// # Errors
///
/// Returns [`InputError::NotANumber`] if the value does not parse, or [`InputError::NotFinite`]
/// if it parses to NaN or an infinity.
pub fn parse_number(field: &'static str, value: &str) -> Result<f64, InputError> {
    let trimmed = value.trim();

    let parsed = trimmed
        .parse::<f64>()
        .map_err(|source| InputError::NotANumber {
            field,
            value: trimmed.to_string(),
            source,
        })?;

    finite(field, parsed)
}

/// Require a finite value.
///
/// # Errors
///
/// Returns [`InputError::NotFinite`] for NaN and infinities.
pub fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

/// Require a finite value that is zero or greater.
///
/// # Errors
///
/// Returns [`InputError::NotFinite`] or [`InputError::OutOfRange`].
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    let value = finite(field, value)?;

    if value < 0.0 {
        return Err(InputError::OutOfRange {
            field,
            value,
            expected: "zero or greater",
        });
    }

    Ok(value)
}

/// Require a finite value strictly greater than zero.
///
/// # Errors
///
/// Returns [`InputError::NotFinite`] or [`InputError::OutOfRange`].
pub fn positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    let value = finite(field, value)?;

    if value <= 0.0 {
        return Err(InputError::OutOfRange {
            field,
            value,
            expected: "greater than zero",
        });
    }

    Ok(value)
}
