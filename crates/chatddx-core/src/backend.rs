//! BackendApi trait definition.
//!
//! The backend CMS/API authenticates every call by the forwarded session
//! cookie. Implementations live in chatddx-infra (e.g. `HttpBackendClient`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use chatddx_types::cluster::ChatConfig;
use chatddx_types::content::CmsContent;
use chatddx_types::diagnosis::DiagnosisReport;
use chatddx_types::error::BackendError;
use chatddx_types::history::HistoryEntry;

use crate::session::SessionCookies;

/// Port to the backend CMS/API.
pub trait BackendApi: Send + Sync {
    /// Localized assistant page content.
    fn fetch_content(
        &self,
        session: &SessionCookies,
    ) -> impl std::future::Future<Output = Result<CmsContent, BackendError>> + Send;

    /// The `diagnoses` chat configuration of a cluster.
    fn fetch_chat_config(
        &self,
        session: &SessionCookies,
        cluster: &str,
    ) -> impl std::future::Future<Output = Result<ChatConfig, BackendError>> + Send;

    /// Record a prompt/response pair in the backend history.
    fn log_history(
        &self,
        session: &SessionCookies,
        entry: &HistoryEntry,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Run the diagnostic API on free-text symptoms.
    fn diagnose(
        &self,
        session: &SessionCookies,
        symptoms: &str,
    ) -> impl std::future::Future<Output = Result<DiagnosisReport, BackendError>> + Send;

    /// Whether the backend accepts the session (`Ok(false)` on 401).
    fn auth_status(
        &self,
        session: &SessionCookies,
    ) -> impl std::future::Future<Output = Result<bool, BackendError>> + Send;
}
