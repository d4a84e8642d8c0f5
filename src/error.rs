//! Custom error types for spending-report
//!
//! This module defines the error hierarchy for the report pipeline using
//! thiserror. Load failures get their own enum since they are the only errors
//! the input file can raise.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the transaction export
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file does not exist
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be opened or parsed
    #[error("Failed to read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The expected worksheet is missing from the workbook
    #[error("Sheet '{sheet}' not found (available: {available})")]
    MissingSheet { sheet: String, available: String },

    /// One or more required columns are absent from the header row
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A cell could not be interpreted as the type its column requires
    #[error("Invalid value in row {row}, column '{column}': {value}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
}

/// The main error type for spending-report operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input (month labels, flags)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input file errors
    #[error(transparent)]
    Load(#[from] LoadError),

    /// PDF assembly errors
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ReportError {
    /// Create an "unreadable" load error for a file
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load(LoadError::Unreadable {
            path: path.into(),
            reason: reason.to_string(),
        })
    }

    /// Check if this error came from loading the input file
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for spending-report operations
pub type ReportResult<T> = Result<T, ReportError>;
