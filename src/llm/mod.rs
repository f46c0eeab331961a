//! LLM: upstream generative-language adapter for the AI proxy.
//!
//! DESIGN
//! ======
//! Configuration is read once at startup into [`LlmConfig`] and turned into
//! an [`Upstream`], which is injected into handlers through `AppState`. A
//! missing credential or an unbuildable HTTP client does not stop the server;
//! it is recorded here and reported per request instead.

pub mod config;
pub mod gemini;
pub mod types;

use std::sync::Arc;

use config::LlmConfig;
pub use types::GenerateContent;

// =============================================================================
// UPSTREAM
// =============================================================================

/// Readiness of the upstream API as resolved at startup.
#[derive(Clone)]
pub enum Upstream {
    /// Credential present and HTTP client built.
    Ready(Arc<dyn GenerateContent>),
    /// The named credential env var is unset or empty.
    MissingCredential { var: String },
    /// No outbound HTTP client could be constructed.
    ClientUnavailable(String),
}

impl Upstream {
    /// Resolve a parsed config into a ready client or a recorded failure.
    #[must_use]
    pub fn from_config(config: LlmConfig) -> Self {
        let Some(api_key) = config.api_key else {
            return Self::MissingCredential { var: config.api_key_var };
        };
        match gemini::GeminiClient::new(api_key, config.base_url, config.model, config.timeouts) {
            Ok(client) => Self::Ready(Arc::new(client)),
            Err(e) => Self::ClientUnavailable(e.to_string()),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Upstream::Ready"),
            Self::MissingCredential { var } => write!(f, "Upstream::MissingCredential({var})"),
            Self::ClientUnavailable(e) => write!(f, "Upstream::ClientUnavailable({e})"),
        }
    }
}
