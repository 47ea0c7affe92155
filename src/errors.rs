//! Unified error types and result handling.
//!
//! Every failure carries a structured kind attached at the point where it
//! happens; the API layer maps kinds to HTTP status codes. There is
//! deliberately no after-the-fact classification of error message text.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a validation rule; message is the first failing rule.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the failing rule
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"order"`
        entity: &'static str,
        /// Primary key that was looked up
        id: i64,
    },

    /// The operation conflicts with current state (referential deletes,
    /// duplicate relationships, double promotion, archive guard).
    #[error("{message}")]
    Conflict {
        /// Description of the conflicting state
        message: String,
    },

    /// An outbound service call failed (payment gateway, email provider).
    #[error("{service} request failed: {message}")]
    Upstream {
        /// Which integration failed
        service: &'static str,
        /// Provider-reported or transport-level detail
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config {
        /// What is missing or malformed in the configuration
        message: String,
    },

    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong while persisting an uploaded file
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a state conflict.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
