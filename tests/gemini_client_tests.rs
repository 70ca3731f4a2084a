use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use email_reply_generator::config::GeminiConfig;
use email_reply_generator::models::email_request::EmailRequest;
use email_reply_generator::models::gemini::GenerateContentRequest;
use email_reply_generator::services::gemini_client::{GeminiClient, GeminiError, GenerateContent};
use email_reply_generator::services::reply_service::{ReplyGenerator, NO_RESPONSE, PROCESSING_ERROR};

const GENERATE_PATH: &str = "/v1/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = GeminiConfig::new("  test-key \n").with_host(server.uri());
    GeminiClient::new(&config).expect("client should build")
}

async fn mount_reply(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_request_shape() {
    let server = MockServer::start().await;
    let request = GenerateContentRequest::from_prompt("Say hi");

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "contents": [ { "parts": [ { "text": "Say hi" } ] } ] })))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw body"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server).generate_content(&request).await.unwrap();
    assert_eq!(body, "raw body");
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    mount_reply(&server, 429, r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#).await;

    let result = client_for(&server)
        .generate_content(&GenerateContentRequest::from_prompt("Say hi"))
        .await;
    assert!(matches!(result, Err(GeminiError::RateLimited)));
}

#[tokio::test]
async fn test_other_status_is_an_error() {
    let server = MockServer::start().await;
    mount_reply(&server, 403, r#"{"error":{"message":"API key not valid"}}"#).await;

    let result = client_for(&server)
        .generate_content(&GenerateContentRequest::from_prompt("Say hi"))
        .await;
    match result {
        Err(GeminiError::Status { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = GeminiConfig::new("test-key").with_host(server.uri());
    config.timeout = Duration::from_millis(200);
    let client = GeminiClient::new(&config).unwrap();

    let result = client
        .generate_content(&GenerateContentRequest::from_prompt("Say hi"))
        .await;
    match result {
        Err(GeminiError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_errors_do_not_expose_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = GeminiConfig::new("SUPER-SECRET-KEY").with_host(server.uri());
    config.timeout = Duration::from_millis(200);
    let client = GeminiClient::new(&config).unwrap();

    let err = client
        .generate_content(&GenerateContentRequest::from_prompt("Say hi"))
        .await
        .expect_err("request should time out");
    assert!(matches!(err, GeminiError::Transport(_)));
    assert!(!err.to_string().contains("SUPER-SECRET-KEY"), "key in error: {}", err);
    assert!(!format!("{:?}", err).contains("SUPER-SECRET-KEY"), "key in debug: {:?}", err);
}

#[tokio::test]
async fn test_connection_errors_do_not_expose_key() {
    let _ = env_logger::builder().is_test(true).try_init();
    // Nothing listens on port 1.
    let config = GeminiConfig::new("SUPER-SECRET-KEY").with_host("http://127.0.0.1:1");
    let client = GeminiClient::new(&config).unwrap();

    let err = client
        .generate_content(&GenerateContentRequest::from_prompt("Say hi"))
        .await
        .expect_err("connection should be refused");
    assert!(matches!(err, GeminiError::Transport(_)));
    assert!(!format!("{} {:?}", err, err).contains("SUPER-SECRET-KEY"));
}

#[tokio::test]
async fn test_end_to_end_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Thanks Alice, tomorrow works." }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.0-flash"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = ReplyGenerator::new(Arc::new(client_for(&server)));
    let request = EmailRequest::new("Hi, can we meet tomorrow? Alice").with_tone("friendly");
    let reply = generator.generate_reply(&request).await.unwrap();
    assert_eq!(reply, "Thanks Alice, tomorrow works.");
}

#[tokio::test]
async fn test_end_to_end_placeholders() {
    let server = MockServer::start().await;
    let generator = ReplyGenerator::new(Arc::new(client_for(&server)));

    mount_reply(&server, 200, r#"{"candidates":[]}"#).await;
    let reply = generator.generate_reply(&EmailRequest::new("Hi")).await.unwrap();
    assert_eq!(reply, NO_RESPONSE);

    server.reset().await;
    mount_reply(&server, 200, "<html>not json</html>").await;
    let reply = generator.generate_reply(&EmailRequest::new("Hi")).await.unwrap();
    assert_eq!(reply, PROCESSING_ERROR);
}

#[tokio::test]
async fn test_end_to_end_rate_limit_is_not_a_placeholder() {
    let server = MockServer::start().await;
    mount_reply(&server, 429, "").await;

    let generator = ReplyGenerator::new(Arc::new(client_for(&server)));
    let result = generator.generate_reply(&EmailRequest::new("Hi")).await;
    assert!(matches!(result, Err(GeminiError::RateLimited)));
}
