//! Ports and request-shaping logic for the ChatDDX web client.
//!
//! This crate defines the traits the infrastructure layer implements
//! ([`backend::BackendApi`], [`llm::provider::ChatProvider`]) and the logic
//! that sits between the browser and those ports: cookie handling, completion
//! request building, and the chat relay. It depends only on `chatddx-types`
//! -- never on `chatddx-infra` or any HTTP crate.

pub mod backend;
pub mod llm;
pub mod relay;
pub mod session;
