//! The assistant page and its form actions.
//!
//! - `GET /` renders the page from the CMS document
//! - `POST /setlang` stores the preferred language in `django_language`
//! - `POST /diagnose` runs the diagnostic API and re-renders the page

use axum::extract::{Form, Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::json;

use chatddx_core::backend::BackendApi;
use chatddx_core::session::{LANGUAGE_COOKIE, is_valid_language_tag, safe_redirect_target};
use chatddx_types::diagnosis::SymptomsForm;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::render::{PageView, render_page};
use crate::state::AppState;

/// GET / - Render the assistant page in the session's language.
pub async fn index(
    State(state): State<AppState>,
    Session(session): Session,
) -> Result<Html<String>, AppError> {
    let content = state
        .backend
        .fetch_content(&session)
        .await
        .map_err(|e| state.page_error(e))?;

    render(render_page(&content, &PageView::default()))
}

/// Form body of `POST /setlang`.
#[derive(Debug, Deserialize)]
pub struct SetLangForm {
    #[serde(default)]
    pub lang: String,
}

/// Query of `POST /setlang`.
#[derive(Debug, Deserialize)]
pub struct SetLangQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// POST /setlang - Set the language cookie, then redirect or echo the language.
///
/// An unsafe `redirectTo` is ignored and answered like a request without one.
pub async fn setlang(
    Query(query): Query<SetLangQuery>,
    Form(form): Form<SetLangForm>,
) -> Result<Response, AppError> {
    let lang = form.lang.trim();
    if !is_valid_language_tag(lang) {
        return Err(AppError::Validation(format!(
            "'{lang}' is not a supported language code"
        )));
    }

    let cookie = [(SET_COOKIE, format!("{LANGUAGE_COOKIE}={lang}; Path=/"))];

    let target = query.redirect_to.as_deref();
    match target.and_then(safe_redirect_target) {
        Some(location) => Ok((cookie, Redirect::to(location)).into_response()),
        None => {
            if let Some(rejected) = target {
                tracing::warn!(redirect_to = %rejected, "ignoring unsafe redirect target");
            }
            Ok((cookie, axum::Json(json!({ "lang": lang }))).into_response())
        }
    }
}

/// POST /diagnose - Post the symptoms to the diagnostic API and show the report.
pub async fn diagnose(
    State(state): State<AppState>,
    Session(session): Session,
    Form(form): Form<SymptomsForm>,
) -> Result<Html<String>, AppError> {
    let symptoms = form.symptoms.trim();
    if symptoms.is_empty() {
        return Err(AppError::Validation("Please describe the symptoms.".to_string()));
    }

    let (content, report) = tokio::try_join!(
        state.backend.fetch_content(&session),
        state.backend.diagnose(&session, symptoms),
    )
    .map_err(|e| state.page_error(e))?;

    tracing::info!(
        candidates = report.possible_diagnoses.len(),
        workup = report.workup.len(),
        "diagnosis received"
    );

    render(render_page(
        &content,
        &PageView {
            symptoms,
            report: Some(&report),
        },
    ))
}

fn render(page: Result<String, minijinja::Error>) -> Result<Html<String>, AppError> {
    page.map(Html).map_err(|e| {
        tracing::error!(error = %e, "failed to render page");
        AppError::Page {
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "The page could not be rendered.".to_string(),
        }
    })
}
