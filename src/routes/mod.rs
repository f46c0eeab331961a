//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two endpoints: a liveness probe and the AI proxy. CORS is wide open (any
//! origin, method, header) so the dashboard can be served from anywhere.

pub mod ai;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/ai", post(ai::ask))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /health`: always `{ "status": "ok" }`.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
