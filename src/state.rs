//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only the upstream resolved at startup; the proxy keeps no
//! per-request or per-session state.

use crate::llm::Upstream;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the upstream client is Arc-wrapped.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: Upstream,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
