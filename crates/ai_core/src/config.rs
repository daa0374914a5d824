//! Provider identities and resolved profiles

use std::{fmt, str::FromStr};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Language-model vendors the gateway can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat completions
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini `generateContent`
    #[serde(alias = "google")]
    Gemini,
}

impl ProviderId {
    /// Lowercase configuration name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Human-readable vendor name used in error messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    /// The single provider tried when this one has no credential
    pub const fn fallback(self) -> Self {
        match self {
            Self::OpenAi => Self::Gemini,
            Self::Gemini => Self::OpenAi,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(format!(
                "Invalid provider: {other}. Use 'openai' or 'gemini'"
            )),
        }
    }
}

/// Everything needed to call one vendor for one capability
///
/// Rebuilt from configuration on every request and never persisted.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Vendor that serves the request
    pub provider: ProviderId,
    /// API base URL, without trailing slash
    pub endpoint: String,
    /// API key
    pub auth_secret: SecretString,
    /// Model used when the request does not name one
    pub default_model: String,
    /// Sampling temperature override
    pub temperature: Option<f32>,
    /// Completion length override
    pub max_tokens: Option<u32>,
}

impl ProviderProfile {
    /// Create a profile with no sampling overrides
    pub fn new(
        provider: ProviderId,
        endpoint: impl Into<String>,
        auth_secret: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            auth_secret: SecretString::from(auth_secret.into()),
            default_model: default_model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion length
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
