//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper: one POST per prompt, credential passed as the `key`
//! query parameter. Any JSON body is returned as-is regardless of status, so
//! upstream error shapes reach the caller unchanged.

use std::time::Duration;

use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{GenerateContent, GenerateRequest, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(api_key: String, base_url: String, model: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, model })
    }

    /// Endpoint URL without the credential.
    #[must_use]
    pub fn endpoint(&self) -> String {
        endpoint_url(&self.base_url, &self.model)
    }
}

#[async_trait::async_trait]
impl GenerateContent for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::single_text(prompt))
            .send()
            .await
            .map_err(LlmError::from_transport)?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(LlmError::from_transport)?;

        parse_body(status, &text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'))
}

fn parse_body(status: u16, text: &str) -> Result<Value, LlmError> {
    serde_json::from_str(text).map_err(|e| LlmError::ApiParse { status, detail: e.to_string() })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
