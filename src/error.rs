//! Error types for box geometry generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for box generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Config file could not be parsed (-3)
    ParseError = -3,
    /// Tooth budget exceeds the edge length (E100)
    NegativeOffset = 100,
    /// Unknown alignment keyword (E101)
    InvalidAlignment = 101,
    /// Tooth count of zero (E102)
    InvalidToothCount = 102,
    /// Zero, negative or non-finite dimension (E103)
    InvalidDimension = 103,
    /// Tolerance drove a run below zero length (E104)
    NegativeRunLength = 104,
    /// Any other inconsistent parameter (E105)
    InvalidParameter = 105,
    /// Preset name not known (E200)
    UnknownPreset = 200,
}

/// Main error type for box generation.
#[derive(Debug, Error)]
pub enum BoxError {
    #[error(
        "Negative offset of edge: {required} needed for teeth and spacing, only {total_length} available"
    )]
    NegativeOffset { total_length: f64, required: f64 },

    #[error("Invalid alignment '{value}': expected 'center' or 'right'")]
    InvalidAlignment { value: String },

    #[error("Invalid tooth count {count}: at least one tooth is required")]
    InvalidToothCount { count: usize },

    #[error("Invalid value for '{field}': {value} (must be {expected})")]
    InvalidDimension {
        field: String,
        value: f64,
        expected: &'static str,
    },

    #[error("Run {index} has negative length {length} after tolerance {tolerance}")]
    NegativeRunLength {
        index: usize,
        length: f64,
        tolerance: f64,
    },

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Unknown preset '{name}' (available: {available})")]
    UnknownPreset { name: String, available: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoxError {
    /// Shorthand for a dimension that failed a range check.
    pub fn dimension(field: impl Into<String>, value: f64, expected: &'static str) -> Self {
        BoxError::InvalidDimension {
            field: field.into(),
            value,
            expected,
        }
    }

    /// Shorthand for a parameter that is inconsistent with the rest.
    pub fn parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BoxError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BoxError::NegativeOffset { .. } => ErrorCode::NegativeOffset,
            BoxError::InvalidAlignment { .. } => ErrorCode::InvalidAlignment,
            BoxError::InvalidToothCount { .. } => ErrorCode::InvalidToothCount,
            BoxError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            BoxError::NegativeRunLength { .. } => ErrorCode::NegativeRunLength,
            BoxError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            BoxError::UnknownPreset { .. } => ErrorCode::UnknownPreset,
            BoxError::FileNotFound { .. } => ErrorCode::FileNotFound,
            BoxError::Json(_) => ErrorCode::ParseError,
            BoxError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// True for errors caused by an inconsistent parameter set.
    ///
    /// These are fatal: the operator has to fix the input, retrying cannot help.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BoxError::NegativeOffset { .. }
                | BoxError::InvalidAlignment { .. }
                | BoxError::InvalidToothCount { .. }
                | BoxError::InvalidDimension { .. }
                | BoxError::NegativeRunLength { .. }
                | BoxError::InvalidParameter { .. }
                | BoxError::UnknownPreset { .. }
        )
    }
}

/// Result type alias for box generation.
pub type Result<T> = std::result::Result<T, BoxError>;
