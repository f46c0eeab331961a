use super::*;
use serde_json::json;

// =============================================================================
// first_candidate_text
// =============================================================================

#[test]
fn candidate_text_found() {
    let payload = json!({
        "candidates": [{ "content": { "parts": [{ "text": "Revenue is $1.2M" }], "role": "model" } }]
    });
    assert_eq!(first_candidate_text(&payload), Some("Revenue is $1.2M"));
}

#[test]
fn candidate_text_uses_first_candidate_only() {
    let payload = json!({
        "candidates": [
            { "content": { "parts": [{ "text": "first" }, { "text": "second part" }] } },
            { "content": { "parts": [{ "text": "other candidate" }] } }
        ]
    });
    assert_eq!(first_candidate_text(&payload), Some("first"));
}

#[test]
fn candidate_text_missing_candidates() {
    let payload = json!({ "error": { "code": 400, "message": "API key not valid" } });
    assert_eq!(first_candidate_text(&payload), None);
}

#[test]
fn candidate_text_empty_candidates() {
    assert_eq!(first_candidate_text(&json!({ "candidates": [] })), None);
}

#[test]
fn candidate_text_empty_string_is_absent() {
    let payload = json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] });
    assert_eq!(first_candidate_text(&payload), None);
}

#[test]
fn candidate_text_non_string_is_absent() {
    let payload = json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] });
    assert_eq!(first_candidate_text(&payload), None);
}

#[test]
fn candidate_text_non_object_payload() {
    assert_eq!(first_candidate_text(&json!("plain string")), None);
    assert_eq!(first_candidate_text(&Value::Null), None);
}

// =============================================================================
// GenerateRequest
// =============================================================================

#[test]
fn generate_request_wraps_single_part() {
    let body = serde_json::to_value(GenerateRequest::single_text("hello")).unwrap();
    assert_eq!(body, json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
}

// =============================================================================
// LlmError display
// =============================================================================

#[test]
fn api_parse_display_includes_status() {
    let err = LlmError::ApiParse { status: 502, detail: "expected value".into() };
    let msg = err.to_string();
    assert!(msg.contains("502"));
    assert!(msg.contains("expected value"));
}

#[test]
fn http_client_build_display() {
    let err = LlmError::HttpClientBuild("no TLS backend".into());
    assert_eq!(err.to_string(), "HTTP client build failed: no TLS backend");
}
