//! API error handling
//!
//! Every failure is rendered as `{error, code, details?, upstreamStatus?, raw?}`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        details: String,
        status: Option<u16>,
    },

    #[error("Bad format")]
    BadFormat { raw: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Status code the vendor answered with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    /// Unparsed model output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_)
            | Self::Upstream { .. }
            | Self::BadFormat { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: msg,
                code: "bad_request".to_string(),
                details: None,
                upstream_status: None,
                raw: None,
            },
            Self::NotConfigured(msg) => ErrorResponse {
                error: msg,
                code: "not_configured".to_string(),
                details: None,
                upstream_status: None,
                raw: None,
            },
            Self::Upstream {
                message,
                details,
                status,
            } => ErrorResponse {
                error: message,
                code: "upstream_error".to_string(),
                details: Some(details),
                upstream_status: status,
                raw: None,
            },
            Self::BadFormat { raw } => ErrorResponse {
                error: "AI returned bad format".to_string(),
                code: "bad_format".to_string(),
                details: None,
                upstream_status: None,
                raw: Some(raw),
            },
            Self::Internal(msg) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code: "internal_error".to_string(),
                details: Some(msg),
                upstream_status: None,
                raw: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::BadRequest(msg),
            ApplicationError::Configuration(msg) => Self::NotConfigured(msg),
            ApplicationError::Upstream {
                message,
                details,
                status,
            } => Self::Upstream {
                message,
                details,
                status,
            },
            ApplicationError::BadFormat { raw } => Self::BadFormat { raw },
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
