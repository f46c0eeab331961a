//! # admindash
//!
//! Backend for the AdminDash single-page dashboard: an HTTP proxy that
//! forwards chat questions plus dashboard context to the Gemini
//! `generateContent` API, and the chat session state machine that drives it.

pub mod chat;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
pub mod wire;
