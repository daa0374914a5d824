//! Gemini client implementation

use async_trait::async_trait;
use domain::MessageRole;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::{ProviderId, ProviderProfile};
use crate::error::ProviderError;
use crate::ports::{ChatCompletion, ChatProvider, ChatRequest, TokenUsage};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Chat provider backed by `POST /models/{model}:generateContent`
#[derive(Debug, Clone)]
pub struct GeminiChatProvider {
    client: Client,
    profile: ProviderProfile,
}

impl GeminiChatProvider {
    /// Create a provider for a resolved profile
    pub const fn new(client: Client, profile: ProviderProfile) -> Self {
        Self { client, profile }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.profile.endpoint, self.profile.default_model
        )
    }

    fn to_wire<'a>(&self, request: &'a ChatRequest) -> GeminiRequest<'a> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for turn in &request.messages {
            let part = GeminiPart {
                text: &turn.content,
            };
            match turn.role {
                MessageRole::System => system_parts.push(part),
                MessageRole::User => contents.push(GeminiContent {
                    role: Some("user"),
                    parts: vec![part],
                }),
                MessageRole::Assistant => contents.push(GeminiContent {
                    role: Some("model"),
                    parts: vec![part],
                }),
            }
        }

        let temperature = self.profile.temperature;
        let max_output_tokens = self.profile.max_tokens;
        let generation_config = (temperature.is_some() || max_output_tokens.is_some()).then_some(
            GenerationConfig {
                temperature,
                max_output_tokens,
            },
        );

        GeminiRequest {
            system_instruction: (!system_parts.is_empty()).then_some(GeminiContent {
                role: None,
                parts: system_parts,
            }),
            contents,
            generation_config,
        }
    }
}

/// Gemini-format request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini-format response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[async_trait]
impl ChatProvider for GeminiChatProvider {
    #[instrument(skip(self, request), fields(model = %self.profile.default_model, turns = request.messages.len()))]
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        let wire = self.to_wire(&request);

        debug!("Sending request to Gemini");

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.profile.auth_secret.expose_secret())
            .json(&wire)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "Gemini request failed");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let first = parsed.candidates.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let content = first
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());
        let usage = parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        debug!(tokens = ?usage, has_content = content.is_some(), "Gemini completion received");

        Ok(ChatCompletion {
            content,
            model: parsed
                .model_version
                .unwrap_or_else(|| self.profile.default_model.clone()),
            usage,
            finish_reason,
        })
    }

    fn provider_id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn default_model(&self) -> &str {
        &self.profile.default_model
    }
}
