//! Realtime negotiation errors

use thiserror::Error;

/// Errors that can occur while negotiating with a realtime or ICE vendor
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Failed to connect to the vendor
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Transport-level timeout
    #[error("Request timed out")]
    Timeout,

    /// Vendor answered with a non-success status
    #[error("Vendor returned status {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Vendor answered 2xx with something unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RealtimeError {
    /// Vendor HTTP status, when the vendor answered with a non-success code
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic text worth showing to an operator
    ///
    /// Vendor bodies are returned verbatim; everything else uses the
    /// error's display form.
    pub fn diagnostics(&self) -> String {
        match self {
            Self::Upstream { body, .. } | Self::InvalidResponse(body) => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RealtimeError {
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
