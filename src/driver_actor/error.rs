//! Error types for the Driver actor.

use thiserror::Error;

/// Errors that can occur during driver operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    /// The requested driver was not found.
    #[error("Driver not found: {0}")]
    NotFound(String),

    /// A driver with this id is already registered.
    #[error("Driver already exists: {0}")]
    AlreadyExists(String),

    /// The driver data provided is invalid.
    #[error("Driver validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DriverError {
    fn from(msg: String) -> Self {
        DriverError::ActorCommunicationError(msg)
    }
}
