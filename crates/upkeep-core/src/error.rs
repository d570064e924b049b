//! Error types for the upkeep library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum UpkeepError {
    /// Checklist submission rejected; nothing was recorded
    #[error("Validation failed: {reason}")]
    Validation { reason: String },
    /// Ad-hoc task id does not resolve against the current plan
    #[error("Task '{task_id}' not found in the maintenance plan")]
    ReferenceNotFound { task_id: String },
    /// Device not found for the given ID
    #[error("Device with ID {id} not found")]
    DeviceNotFound { id: u64 },
    /// Device exists but has no maintenance plan yet
    #[error("Device with ID {device_id} has no maintenance plan")]
    PlanNotFound { device_id: u64 },
    /// Calendar arithmetic left the supported date range
    #[error("Calendar error: {source}")]
    Calendar {
        #[from]
        source: jiff::Error,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> UpkeepError {
        UpkeepError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> UpkeepError {
        UpkeepError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl UpkeepError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a checklist validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Whether the error is recoverable by the user correcting their input.
    ///
    /// Validation and reference errors leave plan and history untouched and
    /// are meant to be surfaced as actionable messages.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ReferenceNotFound { .. }
                | Self::InvalidInput { .. }
                | Self::DeviceNotFound { .. }
                | Self::PlanNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| UpkeepError::database(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, UpkeepError>;
