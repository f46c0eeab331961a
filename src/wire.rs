//! Wire contract for `POST /api/ai`, shared by the proxy and the chat client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body. `context` is opaque dashboard data, serialized verbatim
/// into the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    #[serde(default)]
    pub user_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl AiRequest {
    #[must_use]
    pub fn new(user_question: impl Into<String>, context: Value) -> Self {
        Self { user_question: Some(user_question.into()), context: Some(context) }
    }

    /// The question, or `None` when absent or blank.
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        self.user_question
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }

    /// The context, defaulting to an empty object when absent or null.
    #[must_use]
    pub fn context_or_default(&self) -> Value {
        match &self.context {
            Some(Value::Null) | None => Value::Object(serde_json::Map::new()),
            Some(ctx) => ctx.clone(),
        }
    }
}

/// Response body: either the relayed upstream payload or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AiResponse {
    Relayed { ok: bool, data: Value },
    Failed { error: String },
}

impl AiResponse {
    #[must_use]
    pub fn relayed(data: Value) -> Self {
        Self::Relayed { ok: true, data }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed { error: error.into() }
    }
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
