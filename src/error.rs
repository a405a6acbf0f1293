//! Error types for the pod set quota tooling.
//!
//! The comparator itself is infallible. Errors only arise around it:
//! loading workload documents, parsing resource quantities, and
//! validating workloads before they are compared.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the crate.
#[derive(Debug, Error)]
pub enum PodSetQuotaError {
    /// Configuration and document loading errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The workload file was not found.
    #[error("Workload file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The workload file could not be parsed.
    #[error("Failed to parse workload: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Workload validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// An environment variable holds a value that cannot be interpreted.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidEnvVar {
        /// Name of the variable.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Resource quantity parsing errors.
///
/// Returned by [`Quantity::parse`](crate::model::Quantity::parse). While
/// loading a document these surface inside [`ConfigError::ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// The quantity string is empty.
    #[error("quantity is empty")]
    Empty,

    /// The numeric part is missing or malformed.
    #[error("invalid quantity number: {input:?}")]
    InvalidNumber {
        /// The rejected input.
        input: String,
    },

    /// The unit suffix is not recognized.
    #[error("invalid quantity suffix {suffix:?} in {input:?}")]
    InvalidSuffix {
        /// The rejected input.
        input: String,
        /// The unrecognized suffix.
        suffix: String,
    },

    /// The value cannot be represented exactly.
    #[error("quantity out of range: {input:?}")]
    OutOfRange {
        /// The rejected input.
        input: String,
    },
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, PodSetQuotaError>;

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a parse error with an optional location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }
}

impl QuantityError {
    pub(crate) fn invalid_number(input: &str) -> Self {
        Self::InvalidNumber {
            input: input.to_string(),
        }
    }

    pub(crate) fn out_of_range(input: &str) -> Self {
        Self::OutOfRange {
            input: input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps() {
        let err: PodSetQuotaError = ConfigError::validation("bad count", "podSets[0].count").into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Workload validation failed: bad count"
        );
    }

    #[test]
    fn test_quantity_error_display() {
        let err = QuantityError::InvalidSuffix {
            input: String::from("1Qi"),
            suffix: String::from("Qi"),
        };
        assert_eq!(err.to_string(), "invalid quantity suffix \"Qi\" in \"1Qi\"");
    }
}
