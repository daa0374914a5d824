//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required client field was missing or blank
    #[error("{0}")]
    MissingField(String),

    /// The realtime offer carried no SDP payload
    #[error("Missing SDP offer")]
    MissingSdpOffer,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a missing field error with a client-facing message
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingField(message.into())
    }
}
