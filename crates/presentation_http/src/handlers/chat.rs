//! Chat handler

use std::borrow::Cow;

use axum::{Json, extract::State};
use domain::ChatTurn;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::{Validate, ValidationError};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Chat request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// New user message
    #[serde(default)]
    #[validate(custom(function = "message_present"))]
    pub message: String,
    /// Earlier turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

fn message_present(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("Message is required"))
        );
    }
    Ok(())
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply (or the fallback text)
    pub response: String,
    /// Model that answered
    pub model: String,
    /// Why the fallback text was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handle a chat request
#[instrument(skip(state, request), fields(message_len = request.message.len(), history_len = request.conversation_history.len()))]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let service = state.chat_service()?;
    let reply = service
        .reply(&request.message, &request.conversation_history)
        .await?;

    Ok(Json(ChatResponse {
        response: reply.content,
        model: reply.model,
        error: reply.error,
    }))
}
