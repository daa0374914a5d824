//! Request validation
//!
//! `ValidatedJson` deserializes like `axum::Json` and then runs the body's
//! `validator` rules. Malformed bodies (syntax errors, wrong types, unknown
//! chat roles) and failed rules are both reported as `400 bad_request` in
//! the standard error envelope.

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(describe(&errors)))?;

        Ok(Self(value))
    }
}

/// Collapse field errors into one message
///
/// Rules carry the client-facing text as their message, so fields failing
/// with the same text are reported once.
fn describe(errors: &ValidationErrors) -> String {
    let messages: BTreeSet<String> = errors
        .field_errors()
        .into_values()
        .flatten()
        .map(|error| {
            error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string)
        })
        .collect();

    messages.into_iter().collect::<Vec<_>>().join("; ")
}
