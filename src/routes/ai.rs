//! AI proxy route: `POST /api/ai`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught here and turned into a `{ "error": ... }` body.
//! The detailed cause is logged; callers only see the fixed messages below.
//! Upstream error payloads are not failures at this layer: they are relayed
//! inside the normal `{ ok, data }` envelope.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{error, warn};

use crate::services::ai::{self, AiError};
use crate::state::AppState;
use crate::wire::{AiRequest, AiResponse};

pub const MISSING_QUESTION_MESSAGE: &str = "userQuestion is required";
pub const CLIENT_UNAVAILABLE_MESSAGE: &str = "Server runtime does not have an outbound HTTP client available \
(the TLS backend failed to initialize). Check the server's TLS configuration and restart.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// =============================================================================
// ERROR
// =============================================================================

/// Failures at the HTTP boundary, each mapped to a status and message.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Ai(AiError::MissingQuestion) => StatusCode::BAD_REQUEST,
            Self::Ai(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::InvalidBody(detail) => format!("invalid JSON body: {detail}"),
            Self::Ai(AiError::MissingQuestion) => MISSING_QUESTION_MESSAGE.to_owned(),
            Self::Ai(AiError::MissingCredential { var }) => format!("Server missing {var} in environment"),
            Self::Ai(AiError::ClientUnavailable(_)) => CLIENT_UNAVAILABLE_MESSAGE.to_owned(),
            Self::Ai(AiError::Llm(_)) => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "error in /api/ai");
        } else {
            warn!(error = %self, "rejected /api/ai request");
        }
        (status, Json(AiResponse::failed(self.public_message()))).into_response()
    }
}

// =============================================================================
// HANDLER
// =============================================================================

/// `POST /api/ai`: forward `{ userQuestion, context }` upstream and relay the result.
pub async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, ProxyError> {
    let Json(request) = body.map_err(|e| ProxyError::InvalidBody(e.body_text()))?;
    let context = request.context_or_default();

    let data = ai::answer(&state.upstream, request.question(), &context).await?;
    Ok(Json(AiResponse::relayed(data)))
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
