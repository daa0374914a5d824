//! AI Core - chat completion providers
//!
//! Defines the `ChatProvider` port and one adapter per language-model vendor.
//! The gateway picks a `ProviderProfile` per request and turns it into a
//! provider with [`build_chat_provider`]; callers never branch on the vendor.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod ports;

pub use config::{ProviderId, ProviderProfile};
pub use error::ProviderError;
pub use gemini::GeminiChatProvider;
pub use openai::OpenAiChatProvider;
pub use ports::{ChatCompletion, ChatProvider, ChatRequest, TokenUsage};

/// Build the adapter matching a resolved profile
pub fn build_chat_provider(client: reqwest::Client, profile: ProviderProfile) -> Arc<dyn ChatProvider> {
    match profile.provider {
        ProviderId::OpenAi => Arc::new(OpenAiChatProvider::new(client, profile)),
        ProviderId::Gemini => Arc::new(GeminiChatProvider::new(client, profile)),
    }
}
