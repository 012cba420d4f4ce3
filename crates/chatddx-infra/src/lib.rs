//! Infrastructure layer for the ChatDDX web client.
//!
//! Contains the reqwest-based implementations of the ports defined in
//! `chatddx-core`: the cookie-forwarding backend client and the
//! OpenAI-compatible chat-completions provider, plus the configuration loader.

pub mod backend;
pub mod config;
pub mod llm;
