//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Usable as field names with `Span::record`. The span must declare the field
//! (as `tracing::field::Empty`) when it is created.

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider.
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// Whether the response was streamed back to the caller.
pub const GEN_AI_REQUEST_STREAM: &str = "gen_ai.request.stream";

// --- Operation name values ---

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

// --- Provider name values ---

/// Any endpoint speaking the OpenAI chat-completions protocol.
pub const PROVIDER_OPENAI_COMPATIBLE: &str = "openai_compatible";
