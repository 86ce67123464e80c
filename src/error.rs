//! Custom error types for TripBuddy
//!
//! Every fallible operation in the crate returns [`TripResult`]. Domain rule
//! violations are raised before any state is touched, so an `Err` always means
//! the expense manager is unchanged.

use thiserror::Error;

/// The main error type for TripBuddy operations
#[derive(Error, Debug)]
pub enum TripError {
    /// A value outside its allowed domain (empty name, bad amount, bad index)
    #[error("Invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A required command option was not supplied
    #[error("Missing option: -{0}")]
    MissingOption(String),

    /// The persisted snapshot exists but could not be understood
    #[error("Failed to load data: {0}")]
    DataLoad(String),

    /// A timestamp did not match the expected format
    #[error("Invalid date-time '{input}': {reason}. Expected format: yyyy-MM-dd HH:mm:ss")]
    DateParse { input: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl TripError {
    /// Create an "invalid argument" error
    pub fn invalid_argument(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<std::io::Error> for TripError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for TripBuddy operations
pub type TripResult<T> = Result<T, TripError>;
