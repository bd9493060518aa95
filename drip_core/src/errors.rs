//! # Error Types
//!
//! Structured error types for drip_core. The calculation engine and the
//! document generators are total functions and never fail; errors only come
//! from the edges of the crate: input validation, catalog lookups, parsing
//! and file I/O.
//!
//! ## Example
//!
//! ```rust
//! use drip_core::errors::{DesignError, DesignResult};
//!
//! fn check_spacing(spacing_m: f64) -> DesignResult<()> {
//!     if spacing_m <= 0.0 {
//!         return Err(DesignError::InvalidInput {
//!             field: "lateralSpacing".to_string(),
//!             value: spacing_m.to_string(),
//!             reason: "Spacing must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for drip_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for design operations.
///
/// Each variant carries enough context for a front end to point the user at
/// the offending field, name or file.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// A parameter value is invalid (out of bounds, not finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No preset with the requested id exists in the catalog
    #[error("Preset not found: {id}")]
    PresetNotFound { id: String },

    /// Preset category name not recognized
    #[error("Unknown preset category: {name}")]
    UnknownCategory { name: String },

    /// Export format name not recognized
    #[error("Unknown export format: {name}")]
    UnknownFormat { name: String },

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

    /// A DXF document could not be read back
    #[error("Malformed DXF at line {line}: {reason}")]
    MalformedDxf { line: usize, reason: String },
}

impl DesignError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a PresetNotFound error
    pub fn preset_not_found(id: impl Into<String>) -> Self {
        DesignError::PresetNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedDxf error
    pub fn malformed_dxf(line: usize, reason: impl Into<String>) -> Self {
        DesignError::MalformedDxf {
            line,
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::PresetNotFound { .. } => "PRESET_NOT_FOUND",
            DesignError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            DesignError::UnknownFormat { .. } => "UNKNOWN_FORMAT",
            DesignError::FileError { .. } => "FILE_ERROR",
            DesignError::SerializationError { .. } => "SERIALIZATION_ERROR",
            DesignError::MalformedDxf { .. } => "MALFORMED_DXF",
        }
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        DesignError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DesignError::invalid_input("plotLength", "-5", "Plot length must be at least 1 m");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: DesignError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"InvalidInput\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DesignError::preset_not_found("nope").error_code(), "PRESET_NOT_FOUND");
        assert_eq!(DesignError::malformed_dxf(3, "odd line count").error_code(), "MALFORMED_DXF");
        assert_eq!(
            DesignError::UnknownFormat { name: "pdf".into() }.error_code(),
            "UNKNOWN_FORMAT"
        );
    }

    #[test]
    fn test_display_mentions_field() {
        let error = DesignError::invalid_input("pumpPressure", "9", "too high");
        assert_eq!(error.to_string(), "Invalid input for 'pumpPressure': 9 - too high");
    }
}
