//! Chat-completions request/response types.
//!
//! These model the OpenAI-compatible `/chat/completions` wire shapes the relay
//! needs: the outgoing request, the streamed chunks, and the provider-agnostic
//! [`StreamEvent`] the rest of the client consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Request body for `POST {endpoint}/chat/completions`.
///
/// Optional sampling parameters are omitted from the JSON when unset so the
/// provider applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One `data:` payload of a streamed completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    #[serde(default)]
    pub usage: Option<ChunkUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Token usage reported at the end of a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Events emitted during a streaming completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A piece of assistant text.
    TextDelta { text: String },

    /// The provider reported why it stopped (e.g. "stop", "length").
    Finish { reason: String },

    /// Token usage information.
    Usage(Usage),

    /// The stream has completed.
    Done,
}

/// Errors from chat-completion provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Pull the assistant text out of a non-streamed completion response.
///
/// Returns the first choice's `message.content`, or an empty string when the
/// response carries no text.
pub fn completion_text(response: &serde_json::Value) -> &str {
    response
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageRole;

    #[test]
    fn test_request_omits_unset_parameters() {
        let request = ChatCompletionRequest {
            model: "gpt-4".into(),
            messages: vec![ChatMessage::new(MessageRole::User, "cough")],
            stream: false,
            logit_bias: None,
            frequency_penalty: None,
            max_tokens: Some(4000),
            presence_penalty: None,
            temperature: Some(0.2),
            top_p: None,
            user: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(json["max_tokens"], 4000);
        assert_eq!(json["temperature"], 0.2);
        assert!(!object.contains_key("top_p"));
        assert!(!object.contains_key("logit_bias"));
        assert!(!object.contains_key("user"));
    }

    #[test]
    fn test_chunk_deserialize_content_delta() {
        let data = r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"Pneu"},"finish_reason":null}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(data).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Pneu"));
        assert!(chunk.choices[0].finish_reason.is_none());
        assert!(chunk.usage.is_none());
    }

    #[test]
    fn test_chunk_deserialize_usage_only() {
        let data = r#"{"id":"c1","choices":[],"usage":{"prompt_tokens":12,"completion_tokens":40,"total_tokens":52}}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(data).unwrap();
        assert!(chunk.choices.is_empty());
        assert_eq!(chunk.usage.unwrap().completion_tokens, 40);
    }

    #[test]
    fn test_completion_text() {
        let response = serde_json::json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "1. Sepsis" } }]
        });
        assert_eq!(completion_text(&response), "1. Sepsis");
        assert_eq!(completion_text(&serde_json::json!({ "choices": [] })), "");
    }
}
