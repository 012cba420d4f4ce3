//! Shared domain types for the ChatDDX web client.
//!
//! Everything here is a transient request/response shape: CMS page content,
//! chat cluster configuration, completion requests and stream events,
//! diagnostic reports, plus the error enums and the client configuration.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, secrecy.

pub mod chat;
pub mod cluster;
pub mod config;
pub mod content;
pub mod diagnosis;
pub mod error;
pub mod history;
pub mod llm;
