//! Backend connectivity check.

use anyhow::Result;
use console::style;

use chatddx_core::backend::BackendApi;
use chatddx_core::session::SessionCookies;
use chatddx_infra::backend::HttpBackendClient;
use chatddx_types::config::ClientConfig;
use chatddx_types::error::BackendError;

/// Probe `{api}/auth/` and the CMS document with an optional session.
///
/// Returns `false` when the CMS content could not be loaded.
pub async fn check(
    config: &ClientConfig,
    session: Option<String>,
    lang: Option<String>,
    json: bool,
) -> Result<bool> {
    let backend = HttpBackendClient::new(config)?;
    let session = SessionCookies {
        session_id: session,
        language: lang,
    };

    let auth = backend.auth_status(&session).await;
    let content = backend.fetch_content(&session).await;
    let ok = content.is_ok();

    if json {
        let report = serde_json::json!({
            "api_ssr": config.api_ssr,
            "authenticated": auth.as_ref().ok(),
            "auth_error": auth.as_ref().err().map(ToString::to_string),
            "content": content.as_ref().ok().map(|c| serde_json::json!({
                "title": c.title,
                "lang": c.lang,
                "languages": c.languages.len(),
            })),
            "content_error": content.as_ref().err().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ok);
    }

    println!();
    println!(
        "  {} Backend {}",
        style("⚡").bold(),
        style(&config.api_ssr).cyan()
    );
    println!();

    match auth {
        Ok(true) => println!("  Auth:     {}", style("authenticated").green()),
        Ok(false) => println!("  Auth:     {}", style("anonymous").yellow()),
        Err(e) => println!("  Auth:     {}", style(e).red()),
    }

    match content {
        Ok(content) => println!(
            "  Content:  {} ({}, {} languages)",
            style(&content.title).bold(),
            content.lang,
            content.languages.len()
        ),
        Err(BackendError::Unauthorized) => println!(
            "  Content:  {} (browsers are sent to {})",
            style("login required").yellow(),
            config.login_path
        ),
        Err(e) => println!("  Content:  {}", style(e).red()),
    }
    println!();

    Ok(ok)
}
