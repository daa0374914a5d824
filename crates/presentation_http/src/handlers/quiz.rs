//! Quiz handler

use std::borrow::Cow;

use axum::{Json, extract::State};
use domain::{QuestionCount, QuizSet};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use validator::{Validate, ValidationError};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Quiz request body
///
/// `count` is accepted in any JSON shape and coerced into `[3, 15]`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[serde(default)]
    #[validate(custom(function = "present"))]
    pub topic: String,
    #[serde(default)]
    #[validate(custom(function = "present"))]
    pub level: String,
    #[serde(default)]
    pub count: Option<Value>,
}

fn present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("Missing topic or level"))
        );
    }
    Ok(())
}

/// Handle a quiz generation request
#[instrument(skip(state, request), fields(topic = %request.topic, level = %request.level))]
pub async fn generate_quiz(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuizRequest>,
) -> Result<Json<QuizSet>, ApiError> {
    let count = QuestionCount::from_json(request.count.as_ref());
    let service = state.quiz_service()?;
    let quiz = service
        .generate(&request.topic, &request.level, count)
        .await?;
    Ok(Json(quiz))
}
