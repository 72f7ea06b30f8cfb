//! Integration tests for TranslationGateway against a mocked upstream

use std::time::Duration;

use serde_json::json;
use translation_gateway::{GatewayConfig, GatewayError, TranslationGateway};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
}

fn gateway_for(server: &MockServer) -> TranslationGateway {
    let config = GatewayConfig {
        api_endpoint: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        ..Default::default()
    }
    .with_api_key("sk-test");

    TranslationGateway::new(config).unwrap()
}

#[tokio::test]
async fn test_translate_truncates_keywords() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "deepseek-chat",
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"translation":"Hello","keywords":["a","b","c","d"]}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server).translate("你好").await.unwrap();

    assert_eq!(result.translation, "Hello");
    assert_eq!(result.keywords, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_translate_strips_code_fence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n{\"translation\":\"Hi\",\"keywords\":[\"x\"]}\n```",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server).translate("嗨").await.unwrap();

    assert_eq!(result.translation, "Hi");
    assert_eq!(result.keywords, vec!["x"]);
}

#[tokio::test]
async fn test_translate_sends_text_in_user_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"translation":"Good weather","keywords":["weather"]}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    gateway_for(&mock_server)
        .translate("今天天气很好")
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("今天天气很好"));
}

#[tokio::test]
async fn test_invalid_json_content_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("not json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = gateway_for(&mock_server).translate("你好").await.unwrap_err();

    assert!(matches!(err, GatewayError::Parse { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_invalid_envelope_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = gateway_for(&mock_server).translate("你好").await.unwrap_err();

    assert!(matches!(err, GatewayError::Parse { .. }));
}

#[tokio::test]
async fn test_missing_choices_is_unknown_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let err = gateway_for(&mock_server).translate("你好").await.unwrap_err();

    assert!(matches!(err, GatewayError::Unknown { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_upstream_status_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = gateway_for(&mock_server).translate("你好").await.unwrap_err();

    match &err {
        GatewayError::Upstream { status, body } => {
            assert_eq!(*status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.status_code(), 429);
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn test_empty_text_makes_no_upstream_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);

    for text in ["", "   ", "\n\t"] {
        let err = gateway.translate(text).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));
        assert_eq!(err.status_code(), 400);
    }
}

#[tokio::test]
async fn test_over_length_text_makes_no_upstream_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = gateway_for(&mock_server)
        .translate(&"中".repeat(5001))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Validation { .. }));
}

#[tokio::test]
async fn test_limit_counts_characters_not_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"translation":"Middle","keywords":[]}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // 5000 chars, 15000 bytes
    let result = gateway_for(&mock_server)
        .translate(&"中".repeat(5000))
        .await
        .unwrap();

    assert_eq!(result.translation, "Middle");
    assert!(result.keywords.is_empty());
}

#[tokio::test]
async fn test_missing_api_key_makes_no_upstream_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = GatewayConfig {
        api_endpoint: format!("{}{}", mock_server.uri(), COMPLETIONS_PATH),
        ..Default::default()
    };
    let gateway = TranslationGateway::new(config).unwrap();

    let err = gateway.translate("你好").await.unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}

#[tokio::test]
async fn test_blank_key_from_file_makes_no_upstream_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing bearer"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.json");
    std::fs::write(
        &path,
        json!({
            "api_key": "",
            "api_endpoint": format!("{}{}", mock_server.uri(), COMPLETIONS_PATH)
        })
        .to_string(),
    )
    .unwrap();

    let gateway = TranslationGateway::new(GatewayConfig::from_file(&path).unwrap()).unwrap();

    let err = gateway.translate("你好").await.unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"translation":"late","keywords":[]}"#))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = GatewayConfig {
        api_endpoint: format!("{}{}", mock_server.uri(), COMPLETIONS_PATH),
        timeout_ms: 200,
        ..Default::default()
    }
    .with_api_key("sk-test");
    let gateway = TranslationGateway::new(config).unwrap();

    let err = gateway.translate("你好").await.unwrap_err();

    assert!(matches!(err, GatewayError::Timeout { timeout_ms: 200 }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_identical_calls_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"translation":"Hello","keywords":["greeting"]}"#,
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);

    for _ in 0..2 {
        let result = gateway.translate("你好").await.unwrap();
        assert!(result.keywords.len() <= 3);
    }
}

#[tokio::test]
async fn test_unreachable_upstream_is_unknown_error() {
    let config = GatewayConfig {
        api_endpoint: "http://127.0.0.1:1/v1/chat/completions".to_string(),
        ..Default::default()
    }
    .with_api_key("sk-test");
    let gateway = TranslationGateway::new(config).unwrap();

    let err = gateway.translate("你好").await.unwrap_err();

    assert!(matches!(err, GatewayError::Unknown { .. }));
    assert_eq!(err.status_code(), 500);
}
