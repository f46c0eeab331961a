//! AI service: question + dashboard context → one upstream call.
//!
//! DESIGN
//! ======
//! Validates the question, checks upstream readiness, builds a single prompt
//! embedding the serialized context, and makes exactly one upstream call.
//! The upstream body is returned untouched; interpreting it is the caller's
//! business. Nothing here retries, caches, or truncates.

use serde_json::Value;
use tracing::info;

use crate::llm::Upstream;
use crate::llm::types::LlmError;

const PROMPT_PREAMBLE: &str = "You are an AI assistant for the AdminDash dashboard. \
Analyze the following JSON data to answer user questions concisely and professionally";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("userQuestion is required")]
    MissingQuestion,
    #[error("upstream credential {var} is not configured")]
    MissingCredential { var: String },
    #[error("no outbound HTTP client: {0}")]
    ClientUnavailable(String),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

// =============================================================================
// PROMPT
// =============================================================================

/// Build the single prompt sent upstream.
///
/// Contains the serialized context and the question verbatim, once each.
#[must_use]
pub fn build_prompt(context: &Value, question: &str) -> String {
    format!("Context: {PROMPT_PREAMBLE}: {context}.\n\nUser Question: {question}")
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Answer one question against the upstream API.
///
/// Validation order: question first, then credential, so a malformed request
/// is reported as such even on a misconfigured server. Both checks happen
/// before any network I/O.
///
/// # Errors
///
/// Returns [`AiError`] for a blank question, an unready upstream, or a
/// transport-level failure of the single upstream call.
pub async fn answer(upstream: &Upstream, question: Option<&str>, context: &Value) -> Result<Value, AiError> {
    let question = question
        .filter(|q| !q.trim().is_empty())
        .ok_or(AiError::MissingQuestion)?;

    let llm = match upstream {
        Upstream::Ready(llm) => llm,
        Upstream::MissingCredential { var } => return Err(AiError::MissingCredential { var: var.clone() }),
        Upstream::ClientUnavailable(detail) => return Err(AiError::ClientUnavailable(detail.clone())),
    };

    let prompt = build_prompt(context, question);
    info!(question_len = question.len(), prompt_len = prompt.len(), "ai: forwarding prompt upstream");

    let data = llm.generate(&prompt).await?;
    info!(has_candidates = data.get("candidates").is_some(), "ai: upstream responded");
    Ok(data)
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
