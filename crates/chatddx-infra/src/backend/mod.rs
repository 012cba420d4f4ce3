//! HttpBackendClient -- [`BackendApi`] over the backend's HTTP endpoints.
//!
//! Every call forwards the browser's `sessionid` / `django_language`
//! cookies; the backend decides who the caller is. Redirects are never
//! followed so that the pass-through routes can hand login redirects and
//! `Set-Cookie` headers straight back to the browser.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use chatddx_core::backend::BackendApi;
use chatddx_core::session::SessionCookies;
use chatddx_types::cluster::{ChatCluster, ChatConfig};
use chatddx_types::config::ClientConfig;
use chatddx_types::content::CmsContent;
use chatddx_types::diagnosis::{DiagnosisReport, SymptomsForm};
use chatddx_types::error::BackendError;
use chatddx_types::history::HistoryEntry;

/// Backend client shared by all handlers (cheap to clone).
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
    default_language: String,
}

impl HttpBackendClient {
    /// Build a client for `config.api_ssr`.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_ssr.trim_end_matches('/').to_string(),
            default_language: config.default_language.clone(),
        })
    }

    /// The underlying HTTP client (used by the backend pass-through routes).
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Backend base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full backend URL for a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request carrying the session cookies.
    fn request(&self, method: Method, path: &str, session: &SessionCookies) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(cookie) = session.cookie_header() {
            builder = builder.header(COOKIE, cookie);
        }
        builder
    }

    /// Send and translate non-success statuses into [`BackendError`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionCookies,
    ) -> Result<T, BackendError> {
        debug!(path, "backend GET");
        let response = self.send(self.request(Method::GET, path, session)).await?;
        decode(response).await
    }
}

/// 401 -> `Unauthorized`, 404 -> `NotFound(body)`, other non-2xx -> `Status`.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(match status {
        StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
        StatusCode::NOT_FOUND => BackendError::NotFound(response.text().await.unwrap_or_default()),
        _ => BackendError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

impl BackendApi for HttpBackendClient {
    async fn fetch_content(&self, session: &SessionCookies) -> Result<CmsContent, BackendError> {
        let lang = session.language_or(&self.default_language);
        self.get_json(&format!("/{lang}/cms/assistant"), session)
            .await
    }

    async fn fetch_chat_config(
        &self,
        session: &SessionCookies,
        cluster: &str,
    ) -> Result<ChatConfig, BackendError> {
        let cluster: ChatCluster = self
            .get_json(&format!("/api/chat/clusters/{cluster}"), session)
            .await?;
        Ok(cluster.diagnoses)
    }

    async fn log_history(
        &self,
        session: &SessionCookies,
        entry: &HistoryEntry,
    ) -> Result<(), BackendError> {
        debug!(config = %entry.config, "backend POST history");
        self.send(
            self.request(Method::POST, "/api/chat/history", session)
                .json(entry),
        )
        .await?;
        Ok(())
    }

    async fn diagnose(
        &self,
        session: &SessionCookies,
        symptoms: &str,
    ) -> Result<DiagnosisReport, BackendError> {
        let body = SymptomsForm {
            symptoms: symptoms.to_string(),
        };
        let response = self
            .send(self.request(Method::POST, "/api/diagnose", session).json(&body))
            .await?;
        decode(response).await
    }

    async fn auth_status(&self, session: &SessionCookies) -> Result<bool, BackendError> {
        match self.send(self.request(Method::GET, "/auth/", session)).await {
            Ok(_) => Ok(true),
            Err(BackendError::Unauthorized) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use secrecy::ExposeSecret;

    use super::*;

    fn client_for(server: &MockServer) -> HttpBackendClient {
        let config = ClientConfig {
            api_ssr: server.base_url(),
            ..Default::default()
        };
        HttpBackendClient::new(&config).unwrap()
    }

    fn session(lang: Option<&str>) -> SessionCookies {
        SessionCookies {
            session_id: Some("abc123".into()),
            language: lang.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_fetch_content_forwards_cookies_and_language() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/sv/cms/assistant")
                    .header("cookie", "sessionid=abc123; django_language=sv");
                then.status(200).json_body(serde_json::json!({
                    "title": "ChatDDX",
                    "lang": "sv",
                    "languages": [["en", "English"], ["sv", "Swedish"]]
                }));
            })
            .await;

        let content = client_for(&server)
            .fetch_content(&session(Some("sv")))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(content.title, "ChatDDX");
        assert_eq!(content.languages.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_content_defaults_language() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/en/cms/assistant")
                    .header("cookie", "sessionid=abc123");
                then.status(200).json_body(serde_json::json!({ "title": "ChatDDX" }));
            })
            .await;

        client_for(&server)
            .fetch_content(&session(None))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_translation() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/en/cms/assistant");
                then.status(401).body("Unauthorized");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path("/api/chat/clusters/missing");
                then.status(404).body("Cluster `missing` does not exist");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path("/api/diagnose");
                then.status(503);
            })
            .await;

        let client = client_for(&server);

        let err = client.fetch_content(&session(None)).await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthorized));

        let err = client
            .fetch_chat_config(&session(None), "missing")
            .await
            .unwrap_err();
        match err {
            BackendError::NotFound(text) => assert_eq!(text, "Cluster `missing` does not exist"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let err = client.diagnose(&session(None), "cough").await.unwrap_err();
        match err {
            BackendError::Status { status, reason } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let config = ClientConfig {
            api_ssr: "http://127.0.0.1:1".into(),
            ..Default::default()
        };
        let client = HttpBackendClient::new(&config).unwrap();

        let err = client.fetch_content(&session(None)).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_chat_config_unwraps_diagnoses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/chat/clusters/default");
                then.status(200).json_body(serde_json::json!({
                    "diagnoses": {
                        "identifier": "ddx",
                        "endpoint": "https://api.openai.com/v1",
                        "api_key": "sk-live",
                        "model": "gpt-4",
                        "stream": true,
                        "messages": []
                    }
                }));
            })
            .await;

        let config = client_for(&server)
            .fetch_chat_config(&session(None), "default")
            .await
            .unwrap();

        assert_eq!(config.identifier, "ddx");
        assert_eq!(config.api_key.expose_secret(), "sk-live");
        assert!(config.stream);
    }

    #[tokio::test]
    async fn test_log_history_posts_entry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/chat/history")
                    .header("cookie", "sessionid=abc123")
                    .json_body(serde_json::json!({
                        "config": "ddx",
                        "prompt": "chest pain",
                        "response": "1. ACS"
                    }));
                then.status(200).json_body(serde_json::json!({ "success": "true" }));
            })
            .await;

        let entry = HistoryEntry {
            config: "ddx".into(),
            prompt: "chest pain".into(),
            response: "1. ACS".into(),
        };
        client_for(&server)
            .log_history(&session(None), &entry)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_diagnose_posts_symptoms() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/diagnose")
                    .json_body(serde_json::json!({ "symptoms": "fever, rash" }));
                then.status(200).json_body(serde_json::json!({
                    "possible_diagnoses": [{
                        "diagnosis": "Meningococcal sepsis",
                        "clinical_rationale": "Fever with petechial rash",
                        "urgency": "Immediate Life Threat",
                        "likelyhood": "Moderate"
                    }],
                    "workup": [{ "test_name": "Blood cultures", "priority": "STAT" }]
                }));
            })
            .await;

        let report = client_for(&server)
            .diagnose(&session(None), "fever, rash")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(report.possible_diagnoses[0].diagnosis, "Meningococcal sepsis");
        assert_eq!(report.workup[0].test_name, "Blood cultures");
    }

    #[tokio::test]
    async fn test_auth_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/auth/").header("cookie", "sessionid=abc123");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.path("/auth/").header_missing("cookie");
                then.status(401);
            })
            .await;

        let client = client_for(&server);
        assert!(client.auth_status(&session(None)).await.unwrap());
        assert!(!client.auth_status(&SessionCookies::default()).await.unwrap());
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig {
            api_ssr: "http://backend:8000/".into(),
            ..Default::default()
        };
        let client = HttpBackendClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://backend:8000");
        assert_eq!(client.url("/auth/"), "http://backend:8000/auth/");
    }
}
