//! Wire-level tests for the OpenAI chat completions client.

use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventsmith::{
    CacheConfig, CompletionOptions, CompletionProvider, CostMode, Eventsmith, EventsmithError,
    Message, OpenAiClient, RetryConfig, TitleRequest,
};

fn client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_base_url("test_key", server.uri(), Duration::from_secs(5)).unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo-0125",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    })
}

fn messages() -> Vec<Message> {
    vec![
        Message::system("You write event titles."),
        Message::user("Three titles please."),
    ]
}

#[tokio::test]
async fn successful_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test_key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 85,
            "messages": [
                {"role": "system", "content": "You write event titles."},
                {"role": "user", "content": "Three titles please."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("[\"A b c\"]")))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 85, 0.85))
        .await
        .unwrap();

    assert_eq!(response.content, "[\"A b c\"]");
    assert_eq!(response.model.as_deref(), Some("gpt-3.5-turbo-0125"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.total_tokens, 20);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 10, 0.5))
        .await
        .unwrap_err();

    assert!(matches!(err, EventsmithError::AuthenticationFailed));
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 10, 0.5))
        .await
        .unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn server_error_uses_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {"message": "The server had an error while processing your request."}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 10, 0.5))
        .await
        .unwrap_err();

    match err {
        EventsmithError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("server had an error"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "choices": []
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 10, 0.5))
        .await
        .unwrap_err();

    assert!(matches!(err, EventsmithError::EmptyResponse));
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete(&messages(), &CompletionOptions::new("gpt-3.5-turbo", 10, 0.5))
        .await
        .unwrap_err();

    assert!(matches!(err, EventsmithError::Json(_)));
}

#[tokio::test]
async fn engine_generates_titles_over_http() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "[\"Tech Leadership Summit\", \"Digital Innovation Forum\"]",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let engine = Eventsmith::builder()
        .openai("test_key")
        .base_url(server.uri())
        .cache_config(CacheConfig::new().dir(dir.path()))
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();

    let request = TitleRequest::new("Technology", "Conference", "Professional")
        .count(2)
        .cost_mode(CostMode::Economy);
    let first = engine.generate_titles(&request).await.unwrap();
    let second = engine.generate_titles(&request).await.unwrap();

    assert_eq!(
        first.titles,
        vec!["Tech Leadership Summit", "Digital Innovation Forum"]
    );
    assert!(second.diagnostics.cache_hit);
}
