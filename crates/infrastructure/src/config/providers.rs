//! Language-model provider configuration (chat and quiz).

use ai_core::ProviderId;
use secrecy::SecretString;
use serde::Deserialize;

/// Tutor chat settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatConfig {
    /// Persona instruction; the built-in tutor persona when unset
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Provider selection and shared sampling overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    /// Primary provider for chat
    #[serde(default)]
    pub chat: ProviderId,

    /// Primary provider for quiz generation (defaults to `chat`)
    #[serde(default)]
    pub quiz: Option<ProviderId>,

    /// Sampling temperature applied to every provider call
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Completion length limit applied to every provider call
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// OpenAI settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Gemini settings
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// OpenAI chat completions settings
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model for tutor chat
    #[serde(default = "default_openai_chat_model")]
    pub chat_model: String,

    /// Model for quiz generation (defaults to `chat_model`)
    #[serde(default)]
    pub quiz_model: Option<String>,
}

pub(crate) fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            chat_model: default_openai_chat_model(),
            quiz_model: None,
        }
    }
}

/// Gemini `generateContent` settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model for tutor chat
    #[serde(default = "default_gemini_chat_model")]
    pub chat_model: String,

    /// Model for quiz generation (defaults to `chat_model`)
    #[serde(default)]
    pub quiz_model: Option<String>,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_chat_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            chat_model: default_gemini_chat_model(),
            quiz_model: None,
        }
    }
}
