//! Chat relay endpoint.
//!
//! POST /api/openai
//!
//! Body: `{"messages": [{"role": "user", "content": "..."}]}`. The chat
//! configuration (endpoint, key, model, preamble) is loaded from the backend
//! with the caller's session, so the browser never sees the API key.
//!
//! Streaming configurations answer with `text/plain` chunks of assistant
//! text; otherwise the provider's completion JSON is returned as-is. Every
//! failure, including a malformed body, is the generic 500 from [`AppError`].

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use tracing::field::Empty;

use chatddx_core::relay::RelayOutput;
use chatddx_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_STREAM, OP_CHAT,
    PROVIDER_OPENAI_COMPATIBLE,
};
use chatddx_types::chat::RelayRequest;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::state::AppState;

/// POST /api/openai - Relay a conversation to the configured completions endpoint.
pub async fn openai(
    State(state): State<AppState>,
    Session(session): Session,
    body: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|e| AppError::Relay(format!("invalid request body: {e}")))?;

    let span = tracing::info_span!(
        "chat_relay",
        cluster = %state.relay.cluster(),
        messages = body.messages.len(),
        gen_ai.operation.name = Empty,
        gen_ai.provider.name = Empty,
        gen_ai.request.stream = Empty,
    );
    span.record(GEN_AI_OPERATION_NAME, OP_CHAT);
    span.record(GEN_AI_PROVIDER_NAME, PROVIDER_OPENAI_COMPATIBLE);

    let output = state
        .relay
        .relay(&session, body.messages)
        .instrument(span.clone())
        .await?;

    match output {
        RelayOutput::Completion(completion) => {
            span.record(GEN_AI_REQUEST_STREAM, false);
            Ok(Json(completion).into_response())
        }
        RelayOutput::Stream(text) => {
            span.record(GEN_AI_REQUEST_STREAM, true);
            Ok((
                [
                    (CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (CACHE_CONTROL, "no-cache"),
                ],
                Body::from_stream(text),
            )
                .into_response())
        }
    }
}
