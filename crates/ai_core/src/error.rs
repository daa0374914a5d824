//! Provider errors

use thiserror::Error;

/// Errors that can occur while talking to a chat provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Transport-level timeout
    #[error("Request timed out")]
    Timeout,

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Response body did not match the provider schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Upstream HTTP status, when the provider answered at all
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text worth handing back as error details
    ///
    /// Upstream bodies are returned verbatim.
    pub fn diagnostics(&self) -> String {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
