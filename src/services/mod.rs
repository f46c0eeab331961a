//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the business logic so route handlers stay focused on
//! protocol translation and error-to-status mapping.

pub mod ai;
