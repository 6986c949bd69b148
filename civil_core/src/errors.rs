//! # Error Types
//!
//! Structured error types for civil_core. Every failure the conversion
//! engine can produce is a distinct variant, so hosts can render a message
//! or ignore the condition by matching on the variant (or its
//! [`CalcError::error_code`]) rather than parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use civil_core::conversions::{convert, ConversionRequest};
//! use civil_core::errors::CalcError;
//!
//! let err = convert(&ConversionRequest::new("length", "parsec", "meter", 1.0)).unwrap_err();
//! assert!(matches!(err, CalcError::UnknownUnit { .. }));
//! assert_eq!(err.error_code(), "UNKNOWN_UNIT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for civil_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Name used by hosts that bind the `convert` entry point.
pub type ConversionError = CalcError;

/// Structured error type for conversion, estimation and settings operations.
///
/// All failures are deterministic: the same input fails the same way every
/// time, so none of them are worth retrying.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The requested category is not in the registry
    #[error("Unknown category: '{category}'")]
    UnknownCategory { category: String },

    /// The unit is not declared within the given category
    #[error("Unknown unit '{unit}' in category '{category}'")]
    UnknownUnit { category: String, unit: String },

    /// Both units exist in the category but no direct edge links them
    #[error("No direct conversion from '{from_unit}' to '{to_unit}' in category '{category}'")]
    NoDirectConversion {
        category: String,
        from_unit: String,
        to_unit: String,
    },

    /// An input value is invalid (not finite, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an UnknownCategory error
    pub fn unknown_category(category: impl Into<String>) -> Self {
        CalcError::UnknownCategory {
            category: category.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    /// Create a NoDirectConversion error
    pub fn no_direct_conversion(
        category: impl Into<String>,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
    ) -> Self {
        CalcError::NoDirectConversion {
            category: category.into(),
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure points at a gap in the conversion tables
    /// rather than at something the user typed.
    pub fn is_configuration_gap(&self) -> bool {
        matches!(self, CalcError::NoDirectConversion { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::NoDirectConversion { .. } => "NO_DIRECT_CONVERSION",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
