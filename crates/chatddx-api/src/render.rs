//! HTML rendering with minijinja.
//!
//! Templates are compiled into the binary. Auto-escaping is on for `.html`
//! templates; the CMS fields that carry HTML are marked `|safe` in the
//! templates themselves.

use std::sync::LazyLock;

use axum::http::StatusCode;
use minijinja::{Environment, context};

use chatddx_types::content::CmsContent;
use chatddx_types::diagnosis::DiagnosisReport;

const PAGE_TEMPLATE: &str = "page.html";
const ERROR_TEMPLATE: &str = "error.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    (PAGE_TEMPLATE, include_str!("../templates/page.html")),
    (ERROR_TEMPLATE, include_str!("../templates/error.html")),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "failed to compile template");
        }
    }
    env
});

/// What the assistant page shows besides the CMS content.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Symptoms the user submitted, echoed back into the form.
    pub symptoms: &'a str,
    /// Result of the diagnose action.
    pub report: Option<&'a DiagnosisReport>,
}

/// Render the assistant page.
pub fn render_page(content: &CmsContent, view: &PageView<'_>) -> Result<String, minijinja::Error> {
    ENV.get_template(PAGE_TEMPLATE)?.render(context! {
        content => content,
        symptoms => view.symptoms,
        report => view.report,
    })
}

/// Render the error page for `status`.
///
/// Falls back to plain text when the template cannot be rendered.
pub fn render_error(status: StatusCode, message: &str) -> String {
    let rendered = ENV.get_template(ERROR_TEMPLATE).and_then(|t| {
        t.render(context! {
            status => status.as_u16(),
            reason => status.canonical_reason().unwrap_or_default(),
            message => message,
        })
    });

    rendered.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to render error page");
        format!("{status}: {message}")
    })
}
