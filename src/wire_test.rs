use super::*;
use serde_json::json;

#[test]
fn request_uses_camel_case_field() {
    let req: AiRequest = serde_json::from_value(json!({ "userQuestion": "What is total revenue?" })).unwrap();
    assert_eq!(req.question(), Some("What is total revenue?"));
    assert!(req.context.is_none());
}

#[test]
fn request_empty_body_has_no_question() {
    let req: AiRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(req.question(), None);
}

#[test]
fn request_blank_question_is_absent() {
    let req: AiRequest = serde_json::from_value(json!({ "userQuestion": "  \n\t " })).unwrap();
    assert_eq!(req.question(), None);
}

#[test]
fn request_question_is_not_trimmed() {
    let req: AiRequest = serde_json::from_value(json!({ "userQuestion": "  hi  " })).unwrap();
    assert_eq!(req.question(), Some("  hi  "));
}

#[test]
fn context_defaults_to_empty_object() {
    let absent: AiRequest = serde_json::from_value(json!({ "userQuestion": "q" })).unwrap();
    let null: AiRequest = serde_json::from_value(json!({ "userQuestion": "q", "context": null })).unwrap();
    assert_eq!(absent.context_or_default(), json!({}));
    assert_eq!(null.context_or_default(), json!({}));
}

#[test]
fn context_passes_through_unchanged() {
    let ctx = json!({ "revenue": [{ "month": "Jan", "value": 4000 }], "regions": ["NA", "EU"] });
    let req = AiRequest::new("q", ctx.clone());
    assert_eq!(req.context_or_default(), ctx);
}

#[test]
fn request_serializes_camel_case() {
    let body = serde_json::to_value(AiRequest::new("Hello", json!({ "a": 1 }))).unwrap();
    assert_eq!(body, json!({ "userQuestion": "Hello", "context": { "a": 1 } }));
}

#[test]
fn response_shapes() {
    assert_eq!(
        serde_json::to_value(AiResponse::relayed(json!({ "candidates": [] }))).unwrap(),
        json!({ "ok": true, "data": { "candidates": [] } })
    );
    assert_eq!(
        serde_json::to_value(AiResponse::failed("userQuestion is required")).unwrap(),
        json!({ "error": "userQuestion is required" })
    );
}

#[test]
fn response_deserializes_either_shape() {
    let ok: AiResponse = serde_json::from_value(json!({ "ok": true, "data": { "x": 1 } })).unwrap();
    assert_eq!(ok, AiResponse::relayed(json!({ "x": 1 })));

    let err: AiResponse = serde_json::from_value(json!({ "error": "Internal server error" })).unwrap();
    assert_eq!(err, AiResponse::failed("Internal server error"));
}
