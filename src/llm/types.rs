//! LLM types: upstream errors, the generation trait, and payload helpers.
//!
//! The upstream body is kept as a raw `serde_json::Value`. The proxy relays
//! it untouched; only [`first_candidate_text`] looks inside it.

use serde::Serialize;
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the provider failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The request exceeded the configured timeout.
    #[error("API request timed out: {0}")]
    Timeout(String),

    /// The provider response body was not JSON.
    #[error("API response parse failed (status {status}): {detail}")]
    ApiParse { status: u16, detail: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Map a reqwest failure onto the matching variant.
    ///
    /// The URL is stripped first: it carries the credential as a query parameter.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() { Self::Timeout(err.to_string()) } else { Self::ApiRequest(err.to_string()) }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// `generateContent` request body: a single message wrapping one text part.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    #[must_use]
    pub fn single_text(text: &'a str) -> Self {
        Self { contents: [RequestContent { parts: [RequestPart { text }] }] }
    }
}

// =============================================================================
// PAYLOAD EXTRACTION
// =============================================================================

/// Text of the first candidate's first part, if present and non-empty.
#[must_use]
pub fn first_candidate_text(payload: &Value) -> Option<&str> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

// =============================================================================
// GENERATION TRAIT
// =============================================================================

/// Single-prompt text generation against the upstream API. Enables mocking in tests.
#[async_trait::async_trait]
pub trait GenerateContent: Send + Sync {
    /// Send one prompt upstream and return the response body verbatim.
    ///
    /// Upstream error bodies are returned as `Ok` as long as they are JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, timeout, or a non-JSON body.
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
