//! Error types for toolkit-engine operations.
//!
//! Age validation variants render the exact message shown next to the form,
//! so callers can surface `err.to_string()` without translation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolkitError {
    #[error("Please enter complete date")]
    IncompleteDate,

    #[error("Please enter valid numbers")]
    InvalidNumber,

    #[error("Month must be between 1-12")]
    MonthRange,

    #[error("Day must be between 1-31")]
    DayRange,

    #[error("Year must be between 1900-{current_year}")]
    YearRange { current_year: i32 },

    #[error("Invalid date")]
    InvalidDate,

    #[error("Birth date cannot be in the future")]
    FutureDate,

    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { category: String, unit: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid loan: {0}")]
    InvalidLoan(String),

    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Base64 error: {0}")]
    Base64(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Select at least one option")]
    NoCharacterSet,

    #[error("Password length must be between {min}-{max}, got {got}")]
    PasswordLength { min: usize, max: usize, got: usize },

    #[error("QR payload is empty")]
    EmptyPayload,

    #[error("QR encoding error: {0}")]
    QrEncoding(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
