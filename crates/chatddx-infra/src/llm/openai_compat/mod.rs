//! OpenAI-compatible chat-completions provider.
//!
//! A single [`OpenAiCompatibleProvider`] serves any endpoint speaking the
//! OpenAI chat-completions protocol (OpenAI, Azure-style gateways, vLLM,
//! Ollama, ...). Endpoint and key come from the backend's chat configuration,
//! so providers are cheap per-request values built by
//! [`OpenAiCompatFactory::connect`] around one shared `reqwest::Client`.

pub mod streaming;

use std::time::Duration;

use futures_util::stream;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest_eventsource::EventSource;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use chatddx_core::llm::provider::{ChatProvider, ChatProviderFactory, EventStream};
use chatddx_types::cluster::ChatConfig;
use chatddx_types::llm::{ChatCompletionRequest, LlmError};

use self::streaming::map_event_source;

/// Provider bound to one endpoint and API key.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header. It never appears in Debug
/// output, Display output, or tracing logs.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: SecretString) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the chat-completions endpoint.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request(&self, body: &ChatCompletionRequest) -> reqwest::RequestBuilder {
        self.client
            .post(self.completions_url())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(body)
    }
}

// No Debug impl: the provider holds the bearer key.

/// Map a non-success HTTP status to an [`LlmError`].
pub(crate) fn status_error(status: StatusCode, body: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED => LlmError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            retry_after_ms: None,
        },
        StatusCode::BAD_REQUEST => LlmError::InvalidRequest(body.to_string()),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

impl ChatProvider for OpenAiCompatibleProvider {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<serde_json::Value, LlmError> {
        let mut body = request.clone();
        body.stream = false;

        debug!(url = %self.completions_url(), model = %body.model, "chat completion request");

        let response = self
            .request(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &error_body));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }

    fn stream(&self, request: ChatCompletionRequest) -> EventStream {
        let mut body = request;
        body.stream = true;

        debug!(url = %self.completions_url(), model = %body.model, "chat completion stream");

        let builder = self.request(&body).header(ACCEPT, "text/event-stream");
        match EventSource::new(builder) {
            Ok(source) => map_event_source(source),
            Err(e) => Box::pin(stream::once(async move {
                Err(LlmError::InvalidRequest(e.to_string()))
            })),
        }
    }
}

/// Builds [`OpenAiCompatibleProvider`]s that share one HTTP client.
#[derive(Debug, Clone)]
pub struct OpenAiCompatFactory {
    client: reqwest::Client,
}

impl OpenAiCompatFactory {
    /// `timeout` bounds a whole completion, streamed body included.
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl ChatProviderFactory for OpenAiCompatFactory {
    type Provider = OpenAiCompatibleProvider;

    fn connect(&self, config: &ChatConfig) -> Result<OpenAiCompatibleProvider, LlmError> {
        let endpoint = config.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(LlmError::InvalidRequest(format!(
                "chat configuration '{}' has no usable endpoint",
                config.identifier
            )));
        }

        Ok(OpenAiCompatibleProvider::new(
            self.client.clone(),
            endpoint,
            SecretString::from(config.api_key.expose_secret().to_string()),
        ))
    }
}
