//! ChatDDX web client.
//!
//! Server-rendered pages backed by the ChatDDX backend CMS, the symptoms
//! form action, the chat relay at `/api/openai`, and a pass-through for the
//! backend's admin and static routes.

pub mod http;
pub mod render;
pub mod state;
