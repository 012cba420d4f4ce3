//! Chat-completion provider implementations.
//!
//! The relay only ever talks to OpenAI-compatible endpoints; the endpoint and
//! key come from the backend's chat configuration on each request.

pub mod openai_compat;
