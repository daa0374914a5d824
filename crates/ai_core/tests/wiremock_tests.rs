//! Integration tests for chat providers using WireMock
//!
//! These tests mock the vendor HTTP APIs to verify request framing and
//! response extraction without calling a real provider.

use ai_core::{
    ChatProvider, ChatRequest, GeminiChatProvider, OpenAiChatProvider, ProviderError,
    ProviderId, ProviderProfile, build_chat_provider,
};
use domain::ChatTurn;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn openai_profile(base_url: &str) -> ProviderProfile {
    ProviderProfile::new(ProviderId::OpenAi, base_url, "sk-test", "gpt-4o-mini")
        .with_temperature(Some(0.7))
        .with_max_tokens(Some(200))
}

fn gemini_profile(base_url: &str) -> ProviderProfile {
    ProviderProfile::new(ProviderId::Gemini, base_url, "g-test", "gemini-1.5-flash")
}

fn conversation() -> ChatRequest {
    ChatRequest::new(vec![
        ChatTurn::system("You are a tutor."),
        ChatTurn::user("What is TCP?"),
        ChatTurn::assistant("A transport protocol."),
        ChatTurn::user("And UDP?"),
    ])
}

/// Sample OpenAI chat success response
fn openai_success_response() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini-2024-07-18",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "UDP is connectionless."},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 30, "completion_tokens": 6, "total_tokens": 36}
    })
}

/// Sample Gemini success response
fn gemini_success_response() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": "UDP is "}, {"text": "connectionless."}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5, "totalTokenCount": 17},
        "modelVersion": "gemini-1.5-flash-002"
    })
}

// =============================================================================
// OpenAI Tests
// =============================================================================

mod openai_tests {
    use super::*;

    #[tokio::test]
    async fn complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 200,
                "messages": [
                    {"role": "system", "content": "You are a tutor."},
                    {"role": "user", "content": "What is TCP?"},
                    {"role": "assistant", "content": "A transport protocol."},
                    {"role": "user", "content": "And UDP?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiChatProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let completion = provider.complete(conversation()).await.expect("completion");

        assert_eq!(completion.text(), Some("UDP is connectionless."));
        assert_eq!(completion.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        let usage = completion.usage.expect("usage");
        assert_eq!(usage.total_tokens, 36);
    }

    #[tokio::test]
    async fn complete_with_empty_choices_has_no_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiChatProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let completion = provider.complete(conversation()).await.expect("completion");

        assert!(completion.text().is_none());
        assert_eq!(completion.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn complete_upstream_error_carries_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiChatProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let err = provider.complete(conversation()).await.unwrap_err();

        let ProviderError::Upstream { status, body } = err else {
            unreachable!("Expected Upstream error");
        };
        assert_eq!(status, 401);
        assert_eq!(body, "invalid api key");
    }

    #[tokio::test]
    async fn complete_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiChatProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let err = provider.complete(conversation()).await.unwrap_err();

        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiChatProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let err = provider.complete(conversation()).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
    }
}

// =============================================================================
// Gemini Tests
// =============================================================================

mod gemini_tests {
    use super::*;

    #[tokio::test]
    async fn complete_success_concatenates_parts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-test"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "You are a tutor."}]},
                "contents": [
                    {"role": "user", "parts": [{"text": "What is TCP?"}]},
                    {"role": "model", "parts": [{"text": "A transport protocol."}]},
                    {"role": "user", "parts": [{"text": "And UDP?"}]}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            GeminiChatProvider::new(reqwest::Client::new(), gemini_profile(&mock_server.uri()));
        let completion = provider.complete(conversation()).await.expect("completion");

        assert_eq!(completion.text(), Some("UDP is connectionless."));
        assert_eq!(completion.model, "gemini-1.5-flash-002");
        assert_eq!(completion.usage.expect("usage").prompt_tokens, 12);
    }

    #[tokio::test]
    async fn profile_model_and_limits_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-pro:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"maxOutputTokens": 512}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let profile = ProviderProfile::new(
            ProviderId::Gemini,
            mock_server.uri(),
            "g-test",
            "gemini-1.5-pro",
        )
        .with_max_tokens(Some(512));
        let provider = GeminiChatProvider::new(reqwest::Client::new(), profile);
        let result = provider.complete(conversation()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn blocked_prompt_has_no_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            GeminiChatProvider::new(reqwest::Client::new(), gemini_profile(&mock_server.uri()));
        let completion = provider.complete(conversation()).await.expect("completion");

        assert!(completion.text().is_none());
        assert_eq!(completion.model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn complete_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            GeminiChatProvider::new(reqwest::Client::new(), gemini_profile(&mock_server.uri()));
        let err = provider.complete(conversation()).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("API key not valid"));
    }
}

// =============================================================================
// Factory Tests
// =============================================================================

#[test]
fn factory_selects_adapter_by_profile() {
    let client = reqwest::Client::new();

    let openai = build_chat_provider(client.clone(), openai_profile("http://localhost"));
    assert_eq!(openai.provider_id(), ProviderId::OpenAi);
    assert_eq!(openai.default_model(), "gpt-4o-mini");

    let gemini = build_chat_provider(client, gemini_profile("http://localhost"));
    assert_eq!(gemini.provider_id(), ProviderId::Gemini);
}
