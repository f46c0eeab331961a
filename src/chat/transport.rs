//! Transports a chat session uses to reach the assistant.
//!
//! `ProxyTransport` posts to a running proxy's `/api/ai`. `DirectTransport`
//! skips the proxy and runs the same prompt/upstream logic in-process, which
//! means the caller holds the credential itself.

use std::time::Duration;

use serde_json::Value;

use crate::llm::Upstream;
use crate::llm::config::LlmTimeouts;
use crate::services::ai::{self, AiError};
use crate::wire::{AiRequest, AiResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
    #[error("request to proxy failed: {0}")]
    Request(String),
    #[error("request to proxy timed out: {0}")]
    Timeout(String),
    #[error("proxy returned {status}: {message}")]
    Proxy { status: u16, message: String },
    #[error("unexpected proxy response (status {status}): {detail}")]
    Decode { status: u16, detail: String },
    #[error("direct upstream call failed: {0}")]
    Direct(#[from] AiError),
}

impl TransportError {
    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout(err.to_string()) } else { Self::Request(err.to_string()) }
    }
}

/// One round trip: a request in, the upstream payload out.
#[async_trait::async_trait]
pub trait AssistantTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no upstream payload could be obtained.
    async fn send(&self, request: &AiRequest) -> Result<Value, TransportError>;
}

// =============================================================================
// PROXY
// =============================================================================

pub struct ProxyTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeouts: LlmTimeouts) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        let endpoint = format!("{}/api/ai", base_url.trim_end_matches('/'));
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl AssistantTransport for ProxyTransport {
    async fn send(&self, request: &AiRequest) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        parse_proxy_response(status, &text)
    }
}

fn parse_proxy_response(status: u16, text: &str) -> Result<Value, TransportError> {
    let body: AiResponse =
        serde_json::from_str(text).map_err(|e| TransportError::Decode { status, detail: e.to_string() })?;
    match body {
        AiResponse::Relayed { ok: true, data } => Ok(data),
        AiResponse::Relayed { ok: false, .. } => {
            Err(TransportError::Decode { status, detail: "envelope has ok=false".into() })
        }
        AiResponse::Failed { error } => Err(TransportError::Proxy { status, message: error }),
    }
}

// =============================================================================
// DIRECT
// =============================================================================

pub struct DirectTransport {
    upstream: Upstream,
}

impl DirectTransport {
    #[must_use]
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

#[async_trait::async_trait]
impl AssistantTransport for DirectTransport {
    async fn send(&self, request: &AiRequest) -> Result<Value, TransportError> {
        let context = request.context_or_default();
        Ok(ai::answer(&self.upstream, request.question(), &context).await?)
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
