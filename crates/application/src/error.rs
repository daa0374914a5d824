//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant maps onto exactly one HTTP status and error code in the
/// presentation layer.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Credentials or settings for the selected vendor are missing
    #[error("{0}")]
    Configuration(String),

    /// Vendor call failed or returned an unusable answer
    #[error("{message}")]
    Upstream {
        /// Short summary, e.g. "OpenAI error"
        message: String,
        /// Vendor body or transport error text
        details: String,
        /// HTTP status the vendor answered with, if it answered at all
        status: Option<u16>,
    },

    /// Client input is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Model output could not be turned into the expected JSON
    #[error("AI returned bad format")]
    BadFormat {
        /// Unparsed model output
        raw: String,
    },

    /// Internal invariant broken
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Configuration error for a vendor without credentials
    pub fn not_configured(what: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{what} not configured"))
    }

    /// Upstream failure with vendor diagnostics attached
    pub fn upstream(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: details.into(),
            status: None,
        }
    }

    /// Attach the vendor's HTTP status to an upstream failure
    #[must_use]
    pub fn with_status(self, status: Option<u16>) -> Self {
        match self {
            Self::Upstream {
                message, details, ..
            } => Self::Upstream {
                message,
                details,
                status,
            },
            other => other,
        }
    }

    /// Whether the client is to blame
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
