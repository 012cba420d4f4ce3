//! Chat relay: browser messages in, completion (or text stream) out.
//!
//! For every exchange the relay loads the cluster's chat configuration from
//! the backend with the caller's session, builds the completion request,
//! calls the provider, and posts the prompt/response pair to the backend
//! history. History logging never fails the exchange.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt, stream};
use tracing::{Instrument, debug, info, info_span, warn};

use chatddx_types::chat::ChatMessage;
use chatddx_types::error::RelayError;
use chatddx_types::history::HistoryEntry;
use chatddx_types::llm::{LlmError, StreamEvent, completion_text};

use crate::backend::BackendApi;
use crate::llm::provider::{ChatProvider, ChatProviderFactory};
use crate::llm::request::{build_completion_request, last_user_prompt};
use crate::session::SessionCookies;

/// Stream of assistant text pieces sent to the browser as they arrive.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Result of a relayed exchange.
pub enum RelayOutput {
    /// Non-streaming: the provider's completion JSON, unchanged.
    Completion(serde_json::Value),
    /// Streaming: assistant text deltas. History is logged once the stream ends.
    Stream(TextStream),
}

impl std::fmt::Debug for RelayOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayOutput::Completion(value) => f.debug_tuple("Completion").field(value).finish(),
            RelayOutput::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Relays chat exchanges for one chat cluster.
///
/// Generic over `BackendApi` and `ChatProviderFactory` so chatddx-core never
/// depends on chatddx-infra.
pub struct ChatRelay<B: BackendApi, F: ChatProviderFactory> {
    backend: Arc<B>,
    providers: F,
    cluster: String,
}

impl<B, F> ChatRelay<B, F>
where
    B: BackendApi + 'static,
    F: ChatProviderFactory,
{
    pub fn new(backend: Arc<B>, providers: F, cluster: impl Into<String>) -> Self {
        Self {
            backend,
            providers,
            cluster: cluster.into(),
        }
    }

    /// Name of the cluster this relay reads its configuration from.
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Relay one exchange on behalf of `session`.
    pub async fn relay(
        &self,
        session: &SessionCookies,
        messages: Vec<ChatMessage>,
    ) -> Result<RelayOutput, RelayError> {
        let config = self
            .backend
            .fetch_chat_config(session, &self.cluster)
            .await?;
        let provider = self.providers.connect(&config)?;
        let request = build_completion_request(&config, &messages);

        info!(
            cluster = %self.cluster,
            config = %config.identifier,
            model = %request.model,
            stream = request.stream,
            messages = request.messages.len(),
            "relaying chat exchange"
        );

        let prompt = last_user_prompt(&messages);
        let identifier = config.identifier.clone();

        if !request.stream {
            let span = info_span!(
                "gen_ai.complete",
                gen_ai.operation.name = "chat",
                gen_ai.request.model = %request.model,
                gen_ai.request.max_tokens = ?request.max_tokens,
                gen_ai.request.temperature = ?request.temperature,
                gen_ai.request.stream = false,
            );
            let response = provider.complete(&request).instrument(span).await?;
            let entry = HistoryEntry {
                config: identifier,
                prompt,
                response: completion_text(&response).to_string(),
            };
            log_exchange(self.backend.as_ref(), session, &entry).await;
            return Ok(RelayOutput::Completion(response));
        }

        let span = info_span!(
            "gen_ai.stream",
            gen_ai.operation.name = "chat",
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = ?request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.stream = true,
        );
        let mut events = provider.stream(request);

        // A stream that fails before its first event is a relay error, so the
        // caller can still answer with an error status.
        let first = match events.next().instrument(span.clone()).await {
            Some(Err(e)) => {
                warn!(error = %e, "completion stream failed to start");
                return Err(RelayError::Completion(e));
            }
            first => first,
        };
        let events = stream::iter(first).chain(events);

        let backend = Arc::clone(&self.backend);
        let session = session.clone();

        let text_stream = async_stream::stream! {
            let mut events = events;
            let mut full_response = String::new();
            let mut had_error = false;

            while let Some(event) = events.next().instrument(span.clone()).await {
                match event {
                    Ok(StreamEvent::TextDelta { text }) => {
                        full_response.push_str(&text);
                        yield Ok::<String, LlmError>(text);
                    }
                    Ok(StreamEvent::Finish { reason }) => {
                        debug!(%reason, "completion finished");
                    }
                    Ok(StreamEvent::Usage(usage)) => {
                        debug!(
                            input_tokens = usage.input_tokens,
                            output_tokens = usage.output_tokens,
                            "completion usage"
                        );
                    }
                    Ok(StreamEvent::Done) => break,
                    Err(e) => {
                        warn!(error = %e, "completion stream failed");
                        had_error = true;
                        yield Err(e);
                        break;
                    }
                }
            }

            if !had_error && !full_response.is_empty() {
                let entry = HistoryEntry {
                    config: identifier,
                    prompt,
                    response: full_response,
                };
                log_exchange(backend.as_ref(), &session, &entry).await;
            }
        };

        Ok(RelayOutput::Stream(Box::pin(text_stream)))
    }
}

/// Post the exchange to the backend history, best effort.
async fn log_exchange<B: BackendApi>(backend: &B, session: &SessionCookies, entry: &HistoryEntry) {
    match backend.log_history(session, entry).await {
        Ok(()) => debug!(config = %entry.config, "chat exchange logged"),
        Err(e) => warn!(config = %entry.config, error = %e, "failed to log chat exchange"),
    }
}
