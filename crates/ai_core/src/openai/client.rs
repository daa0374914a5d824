//! OpenAI chat completions client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::{ProviderId, ProviderProfile};
use crate::error::ProviderError;
use crate::ports::{ChatCompletion, ChatProvider, ChatRequest, TokenUsage};

/// Chat provider backed by `POST /chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAiChatProvider {
    client: Client,
    profile: ProviderProfile,
}

impl OpenAiChatProvider {
    /// Create a provider for a resolved profile
    pub const fn new(client: Client, profile: ProviderProfile) -> Self {
        Self { client, profile }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.profile.endpoint)
    }

    fn to_wire<'a>(&'a self, request: &'a ChatRequest) -> OpenAiChatRequest<'a> {
        OpenAiChatRequest {
            model: &self.profile.default_model,
            messages: request
                .messages
                .iter()
                .map(|turn| OpenAiMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
            temperature: self.profile.temperature,
            max_tokens: self.profile.max_tokens,
        }
    }
}

/// OpenAI-format chat request
#[derive(Debug, Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI-format chat response
#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    #[serde(default)]
    message: Option<OpenAiResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    #[instrument(skip(self, request), fields(model = %self.profile.default_model, turns = request.messages.len()))]
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        let wire = self.to_wire(&request);

        debug!("Sending request to OpenAI");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.profile.auth_secret.expose_secret())
            .json(&wire)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "OpenAI request failed");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OpenAiChatResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let first = parsed.choices.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let content = first.and_then(|c| c.message).and_then(|m| m.content);
        let usage = parsed.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, has_content = content.is_some(), "OpenAI completion received");

        Ok(ChatCompletion {
            content,
            model: parsed.model.unwrap_or_else(|| wire.model.to_string()),
            usage,
            finish_reason,
        })
    }

    fn provider_id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn default_model(&self) -> &str {
        &self.profile.default_model
    }
}
