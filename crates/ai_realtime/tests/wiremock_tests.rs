//! Integration tests for realtime and ICE vendors using WireMock

use ai_realtime::{
    ConnectRealtimeProvider, IceCredentialProvider, IceProfile, OpenAiRealtimeProvider,
    RealtimeError, RealtimeProfile, RealtimeProvider, RealtimeVendor, XirsysIceProvider,
    build_realtime_provider,
};
use domain::SdpOffer;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

const OFFER: &str = "v=0\r\no=- 4611731400430051336 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n";
const ANSWER: &str = "v=0\r\no=- 1 2 IN IP4 10.0.0.1\r\ns=-\r\nt=0 0\r\na=ice-lite\r\n";

fn offer() -> SdpOffer {
    SdpOffer::new(OFFER).expect("offer")
}

fn openai_profile(base_url: &str) -> RealtimeProfile {
    RealtimeProfile::new(
        RealtimeVendor::OpenAi,
        base_url,
        "sk-test",
        "gpt-4o-realtime-preview",
    )
}

fn connect_profile(base_url: &str) -> RealtimeProfile {
    RealtimeProfile::new(RealtimeVendor::Connect, base_url, "ck-test", "voice-1")
}

fn ice_profile(base_url: &str) -> IceProfile {
    IceProfile::new(base_url, "classroom", "alice", "s3cret")
}

// =============================================================================
// OpenAI Realtime Tests
// =============================================================================

mod openai_tests {
    use super::*;

    #[tokio::test]
    async fn offer_is_posted_as_raw_sdp() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realtime"))
            .and(query_param("model", "gpt-4o-realtime-preview"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("Content-Type", "application/sdp"))
            .and(body_string(OFFER))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Content-Type", "application/sdp")
                    .set_body_string(ANSWER),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiRealtimeProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let answer = provider
            .create_session(&offer(), "gpt-4o-realtime-preview")
            .await
            .expect("answer");

        assert_eq!(answer.as_str(), ANSWER);
    }

    #[tokio::test]
    async fn model_override_reaches_query_string() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realtime"))
            .and(query_param("model", "gpt-4o-mini-realtime"))
            .respond_with(ResponseTemplate::new(201).set_body_string(ANSWER))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiRealtimeProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let result = provider
            .create_session(&offer(), "gpt-4o-mini-realtime")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejected_offer_carries_vendor_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realtime"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_api_key"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiRealtimeProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let err = provider
            .create_session(&offer(), "gpt-4o-realtime-preview")
            .await
            .unwrap_err();

        let RealtimeError::Upstream { status, body } = err else {
            unreachable!("Expected Upstream error");
        };
        assert_eq!(status, 401);
        assert_eq!(body, r#"{"error":"invalid_api_key"}"#);
    }

    #[tokio::test]
    async fn empty_answer_is_invalid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realtime"))
            .respond_with(ResponseTemplate::new(201).set_body_string(""))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            OpenAiRealtimeProvider::new(reqwest::Client::new(), openai_profile(&mock_server.uri()));
        let err = provider
            .create_session(&offer(), "gpt-4o-realtime-preview")
            .await
            .unwrap_err();

        assert!(matches!(err, RealtimeError::InvalidResponse(_)));
    }
}

// =============================================================================
// Connect Tests
// =============================================================================

mod connect_tests {
    use super::*;

    #[tokio::test]
    async fn offer_is_embedded_in_json_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect"))
            .and(header("Authorization", "Bearer ck-test"))
            .and(body_json(serde_json::json!({"sdp": OFFER, "model": "voice-1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/sdp")
                    .set_body_string(ANSWER),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            ConnectRealtimeProvider::new(reqwest::Client::new(), connect_profile(&mock_server.uri()));
        let answer = provider
            .create_session(&offer(), "voice-1")
            .await
            .expect("answer");

        assert_eq!(answer.as_str(), ANSWER);
    }

    #[tokio::test]
    async fn json_envelope_answer_is_unwrapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"sdp": ANSWER})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            ConnectRealtimeProvider::new(reqwest::Client::new(), connect_profile(&mock_server.uri()));
        let answer = provider
            .create_session(&offer(), "voice-1")
            .await
            .expect("answer");

        assert_eq!(answer.as_str(), ANSWER);
    }

    #[tokio::test]
    async fn json_envelope_without_answer_is_invalid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "queued"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            ConnectRealtimeProvider::new(reqwest::Client::new(), connect_profile(&mock_server.uri()));
        let err = provider
            .create_session(&offer(), "voice-1")
            .await
            .unwrap_err();

        assert!(matches!(err, RealtimeError::InvalidResponse(_)));
        assert!(err.diagnostics().contains("queued"));
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            ConnectRealtimeProvider::new(reqwest::Client::new(), connect_profile(&mock_server.uri()));
        let err = provider
            .create_session(&offer(), "voice-1")
            .await
            .unwrap_err();

        assert_eq!(err.diagnostics(), "bad gateway");
    }
}

// =============================================================================
// Xirsys Tests
// =============================================================================

mod xirsys_tests {
    use super::*;

    async fn fetch_with_body(body: serde_json::Value) -> Result<Vec<domain::IceServer>, RealtimeError> {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/_turn/classroom"))
            .and(header("Authorization", "Basic YWxpY2U6czNjcmV0"))
            .and(body_json(serde_json::json!({"format": "urls"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            XirsysIceProvider::new(reqwest::Client::new(), ice_profile(&mock_server.uri()));
        provider.fetch_ice_servers().await
    }

    #[tokio::test]
    async fn nested_and_flat_envelopes_normalize_identically() {
        let server = serde_json::json!({
            "username": "turn-user",
            "urls": ["stun:eu.xirsys.com", "turn:eu.xirsys.com:80?transport=udp"],
            "credential": "turn-pass"
        });

        let nested = fetch_with_body(serde_json::json!({
            "v": {"iceServers": server.clone()},
            "s": "ok"
        }))
        .await
        .expect("nested");
        let flat = fetch_with_body(serde_json::json!({"iceServers": [server]}))
            .await
            .expect("flat");

        assert_eq!(nested, flat);
        assert_eq!(nested[0].username.as_deref(), Some("turn-user"));
        assert_eq!(nested[0].credential.as_deref(), Some("turn-pass"));
    }

    #[tokio::test]
    async fn error_envelope_is_invalid() {
        let err = fetch_with_body(serde_json::json!({"v": "Unauthorized", "s": "error"}))
            .await
            .unwrap_err();

        assert!(matches!(err, RealtimeError::InvalidResponse(_)));
        assert!(err.diagnostics().contains("Unauthorized"));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/_turn/classroom"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider =
            XirsysIceProvider::new(reqwest::Client::new(), ice_profile(&mock_server.uri()));
        let err = provider.fetch_ice_servers().await.unwrap_err();

        assert_eq!(err.diagnostics(), "forbidden");
        assert_eq!(provider.vendor_name(), "Xirsys");
    }
}

// =============================================================================
// Factory Tests
// =============================================================================

#[test]
fn factory_selects_adapter_by_vendor() {
    let client = reqwest::Client::new();

    let openai = build_realtime_provider(client.clone(), openai_profile("http://localhost"));
    assert_eq!(openai.vendor(), RealtimeVendor::OpenAi);
    assert_eq!(openai.default_model(), "gpt-4o-realtime-preview");

    let connect = build_realtime_provider(client, connect_profile("http://localhost"));
    assert_eq!(connect.vendor(), RealtimeVendor::Connect);
}
