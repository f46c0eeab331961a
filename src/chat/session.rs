//! Chat session: transcript and submission lifecycle for one conversation.
//!
//! DESIGN
//! ======
//! The session is either `Idle` or `Pending`. `submit` is the only way into
//! `Pending` and hands back a [`PendingTicket`]; `resolve` consumes that
//! ticket, so a request can be resolved at most once. Tickets are numbered
//! process-wide; a ticket from another session, an earlier submission, or
//! from before a `reset` is refused.
//!
//! The transcript is append-only. Failures add a fixed apology turn and never
//! surface the underlying error text.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::transport::{AssistantTransport, TransportError};
use crate::llm::types::first_candidate_text;
use crate::wire::AiRequest;

pub const GREETING: &str =
    "Hello! I am your AdminDash assistant. Ask me about revenue, users, or regional performance.";
pub const UNPROCESSED_REPLY: &str = "I couldn't process that request right now.";
pub const CONNECTION_ERROR_REPLY: &str = "Sorry, I encountered an error connecting to the AI service.";

/// Ticket numbers are unique across all sessions in the process.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(0);

// =============================================================================
// TURNS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One transcript entry. Fields are private so a turn cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("draft is empty")]
    EmptyDraft,
    #[error("a request is already pending")]
    AlreadyPending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("ticket {ticket} does not match the pending request")]
    StaleTicket { ticket: u64 },
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { seq: u64 },
}

/// Proof that a request is outstanding. Not `Clone`; consumed by `resolve`.
#[derive(Debug)]
#[must_use = "a pending request must be resolved to return the session to Idle"]
pub struct PendingTicket {
    seq: u64,
}

/// A request ready to send, paired with the ticket that resolves it.
#[derive(Debug)]
pub struct Submission {
    pub ticket: PendingTicket,
    pub request: AiRequest,
}

#[derive(Debug)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    draft: String,
    context: Value,
    phase: Phase,
}

impl ChatSession {
    /// Open a session seeded with the greeting turn.
    #[must_use]
    pub fn new(context: Value) -> Self {
        Self {
            turns: vec![ChatTurn::new(Role::System, GREETING)],
            draft: String::new(),
            context,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. Allowed in either phase.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// `Idle → Pending`: append the user turn, clear the draft, issue a ticket.
    ///
    /// # Errors
    ///
    /// [`SubmitError::AlreadyPending`] while a request is outstanding and
    /// [`SubmitError::EmptyDraft`] for a blank draft. Neither changes state.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if self.is_pending() {
            return Err(SubmitError::AlreadyPending);
        }
        if self.draft.trim().is_empty() {
            return Err(SubmitError::EmptyDraft);
        }

        let question = std::mem::take(&mut self.draft);
        self.turns.push(ChatTurn::new(Role::User, question.clone()));

        let seq = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.phase = Phase::Pending { seq };

        Ok(Submission { ticket: PendingTicket { seq }, request: AiRequest::new(question, self.context.clone()) })
    }

    /// `Pending → Idle`: append exactly one assistant turn for the outcome.
    ///
    /// # Errors
    ///
    /// [`ResolveError::StaleTicket`] if the ticket is not the one currently
    /// pending. The transcript is left untouched in that case.
    pub fn resolve(
        &mut self,
        ticket: PendingTicket,
        outcome: Result<Value, TransportError>,
    ) -> Result<&ChatTurn, ResolveError> {
        if self.phase != (Phase::Pending { seq: ticket.seq }) {
            return Err(ResolveError::StaleTicket { ticket: ticket.seq });
        }
        Ok(self.finish(ticket, outcome))
    }

    fn finish(&mut self, ticket: PendingTicket, outcome: Result<Value, TransportError>) -> &ChatTurn {
        let reply = match outcome {
            Ok(payload) => first_candidate_text(&payload).unwrap_or(UNPROCESSED_REPLY).to_owned(),
            Err(e) => {
                warn!(error = %e, seq = ticket.seq, "chat: request failed");
                CONNECTION_ERROR_REPLY.to_owned()
            }
        };

        self.phase = Phase::Idle;
        self.turns.push(ChatTurn::new(Role::Assistant, reply));
        &self.turns[self.turns.len() - 1]
    }

    /// Submit the draft, await the transport, and resolve.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if the draft could not be submitted. Transport
    /// failures are not errors here; they become an apology turn.
    pub async fn ask(&mut self, transport: &dyn AssistantTransport) -> Result<&ChatTurn, SubmitError> {
        let Submission { ticket, request } = self.submit()?;
        info!(turns = self.turns.len(), "chat: request issued");
        let outcome = transport.send(&request).await;
        // `&mut self` is held across the await, so the ticket is still current.
        Ok(self.finish(ticket, outcome))
    }

    /// Discard the conversation and start over with the greeting.
    ///
    /// Any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(ChatTurn::new(Role::System, GREETING));
        self.draft.clear();
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
