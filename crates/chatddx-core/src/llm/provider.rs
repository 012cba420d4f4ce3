//! ChatProvider trait definition.
//!
//! A provider is bound to one endpoint and API key. Because both come from the
//! backend's chat configuration on every request, providers are created per
//! request through a [`ChatProviderFactory`].
//!
//! Uses RPITIT for `complete` and `Pin<Box<dyn Stream>>` for `stream`, so the
//! stream can outlive the provider and be handed to the HTTP response body.

use std::pin::Pin;

use futures_util::Stream;

use chatddx_types::cluster::ChatConfig;
use chatddx_types::llm::{ChatCompletionRequest, LlmError, StreamEvent};

/// Boxed stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for OpenAI-compatible chat-completion backends.
///
/// Implementations live in chatddx-infra (e.g. `OpenAiCompatibleProvider`).
pub trait ChatProvider: Send + Sync {
    /// Send a non-streaming request and return the provider's JSON response as-is.
    fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, LlmError>> + Send;

    /// Send a streaming request. Returns a stream of events ending in `Done`.
    fn stream(&self, request: ChatCompletionRequest) -> EventStream;
}

/// Creates providers from a backend chat configuration.
pub trait ChatProviderFactory: Send + Sync {
    type Provider: ChatProvider;

    /// Build a provider for `config.endpoint` authenticated with `config.api_key`.
    fn connect(&self, config: &ChatConfig) -> Result<Self::Provider, LlmError>;
}
