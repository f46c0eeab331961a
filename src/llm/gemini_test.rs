use super::*;
use crate::state::test_helpers::spawn_fake_upstream;
use axum::http::StatusCode;
use serde_json::json;

fn client_for(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key".into(), base_url.into(), "gemini-test".into(), LlmTimeouts::default()).unwrap()
}

// =============================================================================
// URL + parsing
// =============================================================================

#[test]
fn endpoint_url_embeds_model() {
    assert_eq!(
        endpoint_url("https://generativelanguage.googleapis.com/v1beta", "gemini-2.5-flash-preview-09-2025"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent"
    );
}

#[test]
fn endpoint_url_tolerates_trailing_slash() {
    assert_eq!(endpoint_url("http://h/v1beta/", "m"), "http://h/v1beta/models/m:generateContent");
}

#[test]
fn endpoint_omits_credential() {
    let client = client_for("http://127.0.0.1:1");
    assert!(!client.endpoint().contains("test-key"));
    assert!(client.endpoint().contains("gemini-test"));
}

#[test]
fn parse_body_accepts_any_json() {
    let value = parse_body(200, r#"{"candidates":[]}"#).unwrap();
    assert_eq!(value, json!({ "candidates": [] }));
}

#[test]
fn parse_body_rejects_non_json() {
    let err = parse_body(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse { status: 502, .. }));
}

// =============================================================================
// Live calls against a local fake upstream
// =============================================================================

#[tokio::test]
async fn generate_posts_single_part_with_key_query() {
    let upstream =
        spawn_fake_upstream(StatusCode::OK, json!({ "candidates": [{ "content": { "parts": [{ "text": "hi" }] } }] }))
            .await;
    let client = client_for(&upstream.base_url);

    let body = client.generate("the prompt").await.unwrap();
    assert_eq!(body.pointer("/candidates/0/content/parts/0/text"), Some(&json!("hi")));

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/models/gemini-test:generateContent");
    assert_eq!(calls[0].query.as_deref(), Some("key=test-key"));
    assert_eq!(calls[0].body, json!({ "contents": [{ "parts": [{ "text": "the prompt" }] }] }));
}

#[tokio::test]
async fn generate_returns_upstream_error_body_as_ok() {
    let error_body = json!({ "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" } });
    let upstream = spawn_fake_upstream(StatusCode::BAD_REQUEST, error_body.clone()).await;
    let client = client_for(&upstream.base_url);

    let body = client.generate("q").await.unwrap();
    assert_eq!(body, error_body);
}

#[tokio::test]
async fn generate_unreachable_host_is_request_error() {
    // Port 1 on loopback refuses connections.
    let client = client_for("http://127.0.0.1:1");
    let err = client.generate("q").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_) | LlmError::Timeout(_)));
}

#[tokio::test]
async fn request_error_text_omits_credential() {
    let client = GeminiClient::new("SUPERSECRET".into(), "http://127.0.0.1:1".into(), "m".into(), LlmTimeouts::default())
        .unwrap();
    let err = client.generate("q").await.unwrap_err();

    assert!(!err.to_string().contains("SUPERSECRET"));
    let wrapped = crate::routes::ai::ProxyError::from(crate::services::ai::AiError::Llm(err));
    assert!(!wrapped.to_string().contains("SUPERSECRET"));
}
