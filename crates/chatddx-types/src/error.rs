use thiserror::Error;

use crate::llm::LlmError;

/// Errors from calls to the backend CMS/API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend rejected the forwarded session (HTTP 401).
    #[error("not authenticated")]
    Unauthorized,

    /// HTTP 404; carries the backend's response text.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("backend returned {status} {reason}")]
    Status { status: u16, reason: String },

    /// The backend could not be reached.
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The backend answered with a body we could not decode.
    #[error("invalid backend response: {0}")]
    Decode(String),
}

/// Errors from relaying a chat exchange.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to load chat configuration: {0}")]
    Config(#[from] BackendError),

    #[error("chat completion failed: {0}")]
    Completion(#[from] LlmError),
}

/// Errors from loading the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("invalid config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
