//! Application error type mapping to HTTP responses.
//!
//! Page routes answer with a redirect or the rendered error page; the chat
//! relay always answers with the same generic JSON body so nothing about the
//! upstream failure leaks to the browser.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::json;

use chatddx_types::error::{BackendError, RelayError};

use crate::render::render_error;

/// Body of every failed `/api/openai` response.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to process the request";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The backend does not know the session: send the browser to log in.
    LoginRequired { location: String },
    /// Render the error page.
    Page { status: StatusCode, message: String },
    /// The request itself is invalid.
    Validation(String),
    /// The chat relay failed; the detail is logged, never returned.
    Relay(String),
}

impl AppError {
    /// Status translation for backend failures on page routes.
    pub fn from_backend(error: BackendError, login_path: &str) -> Self {
        match error {
            BackendError::Unauthorized => AppError::LoginRequired {
                location: login_path.to_string(),
            },
            BackendError::NotFound(text) => AppError::Page {
                status: StatusCode::NOT_FOUND,
                message: text,
            },
            BackendError::Status { status, reason } => AppError::Page {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: reason,
            },
            BackendError::Transport(detail) => {
                tracing::warn!(error = %detail, "backend unreachable");
                AppError::Page {
                    status: StatusCode::BAD_GATEWAY,
                    message: "The service is temporarily unavailable. Please try again later."
                        .to_string(),
                }
            }
            BackendError::Decode(detail) => {
                tracing::warn!(error = %detail, "backend response could not be decoded");
                AppError::Page {
                    status: StatusCode::BAD_GATEWAY,
                    message: "The service returned an unexpected response.".to_string(),
                }
            }
        }
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::LoginRequired { location } => Redirect::temporary(&location).into_response(),
            AppError::Page { status, message } => {
                (status, Html(render_error(status, &message))).into_response()
            }
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Html(render_error(StatusCode::BAD_REQUEST, &message)),
            )
                .into_response(),
            AppError::Relay(detail) => {
                tracing::error!(error = %detail, "chat relay failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": RELAY_FAILURE_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    const LOGIN: &str = "/admin/login/?next=/";

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = AppError::from_backend(BackendError::Unauthorized, LOGIN).into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], LOGIN);
    }

    #[test]
    fn not_found_keeps_backend_text() {
        match AppError::from_backend(BackendError::NotFound("No page".into()), LOGIN) {
            AppError::Page { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "No page");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_statuses_pass_through() {
        let error = BackendError::Status {
            status: 503,
            reason: "Service Unavailable".into(),
        };
        let response = AppError::from_backend(error, LOGIN).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn transport_failure_is_bad_gateway() {
        let error = BackendError::Transport("connection refused".into());
        match AppError::from_backend(error, LOGIN) {
            AppError::Page { status, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(!message.contains("connection refused"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn relay_failure_is_generic_500() {
        let response = AppError::Relay("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
