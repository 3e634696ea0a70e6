// Copyright 2025 Cowboy AI, LLC.

//! Error types for storage and identifier handling
//!
//! These errors never cross the service boundary. Document stores and id
//! parsing return them, and the repository layer folds them into
//! [`OperationResult`](crate::OperationResult) data before anything reaches a
//! caller.

use thiserror::Error;

/// Errors that can occur below the repository boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Identifier was empty or whitespace
    #[error("ID cannot be empty")]
    EmptyId,

    /// Identifier was not a hyphenated UUID
    #[error("ID must be a valid UUID: {0}")]
    InvalidIdFormat(String),

    /// Backing store rejected or failed the request
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Could not reach the backing store
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for storage operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl DomainError {
    /// Create a storage error from anything displayable
    pub fn storage(err: impl std::fmt::Display) -> Self {
        DomainError::StorageError(err.to_string())
    }

    /// Check if this error came from id guarding
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, DomainError::EmptyId | DomainError::InvalidIdFormat(_))
    }

    /// Check if this error came from the backing store
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            DomainError::StorageError(_)
                | DomainError::ConnectionFailed(_)
                | DomainError::SerializationError(_)
        )
    }

    /// Message without the variant prefix, used when wrapping into results
    pub fn detail(&self) -> String {
        match self {
            DomainError::StorageError(msg)
            | DomainError::SerializationError(msg)
            | DomainError::ConnectionFailed(msg)
            | DomainError::ConfigurationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
