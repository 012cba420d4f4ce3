//! Prompt/response log entry posted to `POST /api/chat/history`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Identifier of the chat configuration that produced the response.
    pub config: String,
    pub prompt: String,
    pub response: String,
}
