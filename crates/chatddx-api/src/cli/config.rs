//! Print the effective configuration.

use anyhow::Result;
use console::style;

use chatddx_types::config::ClientConfig;

/// Show the configuration after file, environment and flag overrides.
pub fn show_config(config: &ClientConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let rows = [
        ("api_ssr", config.api_ssr.clone()),
        ("default_language", config.default_language.clone()),
        ("chat_cluster", config.chat_cluster.clone()),
        ("login_path", config.login_path.clone()),
        ("assets_dir", config.assets_dir.clone()),
        ("backend_timeout_secs", config.backend_timeout_secs.to_string()),
        ("completion_timeout_secs", config.completion_timeout_secs.to_string()),
        ("body_limit_bytes", config.body_limit_bytes.to_string()),
    ];

    println!();
    for (key, value) in rows {
        println!("  {:<24} {}", style(key).dim(), value);
    }
    println!();

    Ok(())
}
