//! Chat service - tutor conversations routed to one chat provider

use std::{fmt, sync::Arc, time::Instant};

use ai_core::{ChatProvider, ChatRequest, ProviderError};
use domain::ChatTurn;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;

/// Persona instruction placed before every conversation
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, patient tutor on an online \
learning platform. Explain concepts clearly, keep answers concise, use short examples, \
and encourage the learner to think through problems on their own.";

/// Reply used when the provider gave no usable text
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't come up with a reply just now. Please try again.";

/// Outcome of one chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Reply text (or [`FALLBACK_REPLY`])
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Set when the provider reply could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Service for handling tutor conversations
pub struct ChatService {
    provider: Arc<dyn ChatProvider>,
    system_prompt: String,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService")
            .field("provider", &self.provider.provider_id())
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

impl ChatService {
    /// Create a chat service with the default tutor persona
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_system_prompt(provider, DEFAULT_SYSTEM_PROMPT)
    }

    /// Create a chat service with a custom persona
    pub fn with_system_prompt(provider: Arc<dyn ChatProvider>, prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: prompt.into(),
        }
    }

    /// Assemble the conversation sent upstream
    ///
    /// Persona first, then the history as given, then the new message.
    pub fn build_conversation(&self, message: &str, history: &[ChatTurn]) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(history.len() + 2);
        turns.push(ChatTurn::system(self.system_prompt.clone()));
        turns.extend_from_slice(history);
        turns.push(ChatTurn::user(message));
        turns
    }

    /// Answer one message in the context of `history`
    #[instrument(
        skip(self, message, history),
        fields(provider = %self.provider.provider_id(), message_len = message.len(), history_len = history.len())
    )]
    pub async fn reply(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ChatReply, ApplicationError> {
        let start = Instant::now();
        let request = ChatRequest::new(self.build_conversation(message, history));
        let provider_name = self.provider.provider_id().display_name();

        let completion = match self.provider.complete(request).await {
            Ok(completion) => completion,
            Err(ProviderError::InvalidResponse(detail)) => {
                warn!(%detail, "Unreadable provider reply, using fallback");
                return Ok(ChatReply {
                    content: FALLBACK_REPLY.to_string(),
                    model: self.provider.default_model().to_string(),
                    error: Some(format!("{provider_name} returned an unreadable reply")),
                });
            },
            Err(err) => {
                warn!(error = %err, "Chat completion failed");
                return Err(ApplicationError::upstream(
                    format!("{provider_name} error"),
                    err.diagnostics(),
                )
                .with_status(err.status()));
            },
        };

        debug!(
            model = %completion.model,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Chat response generated"
        );

        let content = completion
            .text()
            .map_or_else(|| FALLBACK_REPLY.to_string(), str::to_owned);

        Ok(ChatReply {
            content,
            model: completion.model,
            error: None,
        })
    }
}
