//! Port definitions for chat providers
//!
//! Defines the trait (port) every vendor adapter implements, plus the
//! vendor-neutral request and response records.

use async_trait::async_trait;
use domain::ChatTurn;

use crate::{config::ProviderId, error::ProviderError};

/// Vendor-neutral chat completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Full conversation, oldest first
    ///
    /// Model, temperature and token limit come from the provider profile.
    pub messages: Vec<ChatTurn>,
}

impl ChatRequest {
    /// Create a request from a prepared conversation
    pub const fn new(messages: Vec<ChatTurn>) -> Self {
        Self { messages }
    }

    /// Create a one-shot request with a system prompt
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self::new(vec![ChatTurn::system(system), ChatTurn::user(user)])
    }
}

/// Vendor-neutral completion result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Text of the first completion, if the vendor returned any
    pub content: Option<String>,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason reported by the vendor
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    /// Completion text, treating blank output as absent
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for chat completion vendors
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Issue exactly one completion call; never retries
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError>;

    /// Vendor behind this adapter
    fn provider_id(&self) -> ProviderId;

    /// Model used when the request does not override it
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use domain::MessageRole;

    use super::*;

    #[test]
    fn request_with_system() {
        let req = ChatRequest::with_system("You are helpful", "Hi");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, MessageRole::System);
        assert_eq!(req.messages[1].role, MessageRole::User);
        assert_eq!(req.messages[1].content, "Hi");
    }

    #[test]
    fn blank_completion_has_no_text() {
        let completion = ChatCompletion {
            content: Some("  \n".to_string()),
            model: "m".to_string(),
            usage: None,
            finish_reason: None,
        };
        assert!(completion.text().is_none());
    }

    #[test]
    fn completion_text_is_returned() {
        let completion = ChatCompletion {
            content: Some("Hello!".to_string()),
            model: "m".to_string(),
            usage: None,
            finish_reason: Some("stop".to_string()),
        };
        assert_eq!(completion.text(), Some("Hello!"));
    }
}
