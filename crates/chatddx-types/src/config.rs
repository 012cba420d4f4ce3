//! Client configuration.
//!
//! `ClientConfig` represents `config.toml`: where the backend lives, which
//! chat cluster the relay uses and a few timeouts. All fields have defaults,
//! so an empty file (or no file at all) yields a working development setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend as reachable from this server
    /// (e.g. `http://127.0.0.1:8000`), without trailing slash.
    #[serde(default = "default_api_ssr")]
    pub api_ssr: String,

    /// Language used for CMS requests when the browser has no valid
    /// `django_language` cookie.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Chat cluster whose `diagnoses` configuration drives the relay.
    #[serde(default = "default_chat_cluster")]
    pub chat_cluster: String,

    /// Where unauthenticated page loads are redirected.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Directory with the client's own static assets, served at `/assets`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Timeout for backend calls.
    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,

    /// Timeout for chat-completion calls (streams included).
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,

    /// Largest request body accepted by the backend pass-through.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_api_ssr() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_chat_cluster() -> String {
    "default".to_string()
}

fn default_login_path() -> String {
    "/admin/login/?next=/".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    30
}

fn default_completion_timeout_secs() -> u64 {
    300
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_ssr: default_api_ssr(),
            default_language: default_language(),
            chat_cluster: default_chat_cluster(),
            login_path: default_login_path(),
            assets_dir: default_assets_dir(),
            backend_timeout_secs: default_backend_timeout_secs(),
            completion_timeout_secs: default_completion_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ClientConfig {
    /// Join a backend path (starting with `/`) onto `api_ssr`.
    pub fn backend_url(&self, path: &str) -> String {
        format!("{}{}", self.api_ssr.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_ssr, "http://127.0.0.1:8000");
        assert_eq!(config.default_language, "en");
        assert_eq!(config.chat_cluster, "default");
        assert_eq!(config.login_path, "/admin/login/?next=/");
        assert_eq!(config.backend_timeout_secs, 30);
        assert_eq!(config.completion_timeout_secs, 300);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_ssr = "https://backend.chatddx.com/"
default_language = "sv"
chat_cluster = "emergency"
completion_timeout_secs = 60
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_language, "sv");
        assert_eq!(config.chat_cluster, "emergency");
        assert_eq!(config.completion_timeout_secs, 60);
        assert_eq!(config.login_path, "/admin/login/?next=/");
        assert_eq!(
            config.backend_url("/api/chat/history"),
            "https://backend.chatddx.com/api/chat/history"
        );
    }
}
