//! Chat cluster configuration served by the backend.
//!
//! `GET /api/chat/clusters/{cluster}` answers with `{"diagnoses": { ... }}`;
//! the inner object is a [`ChatConfig`]: endpoint, API key, model, preamble
//! messages and the optional sampling parameters that were set by an admin.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::chat::ChatMessage;

/// Backend response for a chat cluster.
#[derive(Debug, Deserialize)]
pub struct ChatCluster {
    pub diagnoses: ChatConfig,
}

/// One token bias entry as stored by the backend (`bias` in -100..=100).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogitBias {
    pub token: String,
    pub bias: i32,
}

/// Chat configuration used to build a completion request.
///
/// The API key is wrapped in [`SecretString`] so it never shows up in Debug
/// output or logs.
#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub pk: Option<i64>,
    pub identifier: String,
    pub endpoint: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,
    pub model: String,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub logit_bias: Option<Vec<LogitBias>>,
    #[serde(default)]
    pub frequency_penalty: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub presence_penalty: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub user: Option<String>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::chat::MessageRole;

    #[test]
    fn test_cluster_deserialize_full() {
        let json = serde_json::json!({
            "diagnoses": {
                "pk": 3,
                "identifier": "ddx-gpt4",
                "endpoint": "https://api.openai.com/v1",
                "api_key": "sk-secret",
                "model": "gpt-4",
                "stream": true,
                "messages": [
                    { "role": "system", "content": "You are a triage assistant.", "name": "ddx" }
                ],
                "logit_bias": [{ "token": "1734", "bias": -100 }],
                "temperature": 0.2,
                "max_tokens": 4000,
                "user": "clinic-7"
            }
        });

        let cluster: ChatCluster = serde_json::from_value(json).unwrap();
        let config = cluster.diagnoses;
        assert_eq!(config.pk, Some(3));
        assert_eq!(config.identifier, "ddx-gpt4");
        assert_eq!(config.api_key.expose_secret(), "sk-secret");
        assert!(config.stream);
        assert_eq!(config.messages[0].role, MessageRole::System);
        assert_eq!(config.messages[0].name.as_deref(), Some("ddx"));
        assert_eq!(config.logit_bias.as_ref().unwrap()[0].bias, -100);
        assert_eq!(config.max_tokens, Some(4000));
        assert!(config.top_p.is_none());
        assert!(config.frequency_penalty.is_none());
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let json = serde_json::json!({
            "identifier": "default",
            "endpoint": "http://localhost:8080/v1",
            "api_key": "sk-do-not-print",
            "model": "gpt-4o"
        });
        let config: ChatConfig = serde_json::from_value(json).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-do-not-print"));
        assert!(!config.stream);
        assert!(config.messages.is_empty());
    }
}
