//! Observability for the ChatDDX web client: subscriber setup and the
//! OpenTelemetry GenAI attribute names recorded on relay spans.

pub mod genai_attrs;
pub mod tracing_setup;
