//! Application state wiring the services together.
//!
//! The relay is generic over its backend and provider factory; AppState pins
//! it to the reqwest implementations from chatddx-infra.

use std::sync::Arc;
use std::time::Duration;

use chatddx_core::relay::ChatRelay;
use chatddx_infra::backend::HttpBackendClient;
use chatddx_infra::llm::openai_compat::OpenAiCompatFactory;
use chatddx_types::config::ClientConfig;
use chatddx_types::error::BackendError;

use crate::http::error::AppError;

/// The relay pinned to the HTTP backend and OpenAI-compatible providers.
pub type ConcreteChatRelay = ChatRelay<HttpBackendClient, OpenAiCompatFactory>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub backend: Arc<HttpBackendClient>,
    pub relay: Arc<ConcreteChatRelay>,
}

impl AppState {
    /// Build the HTTP clients for `config`. No network calls are made.
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let backend = Arc::new(HttpBackendClient::new(&config)?);
        let providers =
            OpenAiCompatFactory::new(Duration::from_secs(config.completion_timeout_secs))?;
        let relay = ChatRelay::new(Arc::clone(&backend), providers, config.chat_cluster.clone());

        Ok(Self {
            config: Arc::new(config),
            backend,
            relay: Arc::new(relay),
        })
    }

    /// Translate a backend failure on a page route.
    pub fn page_error(&self, error: BackendError) -> AppError {
        AppError::from_backend(error, &self.config.login_path)
    }
}
