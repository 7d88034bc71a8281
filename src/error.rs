//! Custom error types for barbacoa
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for barbacoa operations
#[derive(Error, Debug)]
pub enum BarbacoaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// An amount that is not a valid, non-negative number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// An expense submitted without a payer
    #[error("Expense has no participant")]
    MissingParticipant,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A settled event with the same name is already stored
    #[error("A barbacoa named '{0}' already exists")]
    DuplicateEventName(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote backend returned a failure or could not be reached
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BarbacoaError {
    /// Create a "not found" error for barbacoas
    pub fn barbacoa_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Barbacoa",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for roster participants
    pub fn participant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Participant",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error of any kind
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidAmount(_) | Self::MissingParticipant
        )
    }

    /// Check if this is a duplicate event name conflict
    pub fn is_duplicate_event_name(&self) -> bool {
        matches!(self, Self::DuplicateEventName(_))
    }
}

impl From<std::io::Error> for BarbacoaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BarbacoaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for barbacoa operations
pub type BarbacoaResult<T> = Result<T, BarbacoaError>;
