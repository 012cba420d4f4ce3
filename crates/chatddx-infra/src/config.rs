//! Client configuration loader.
//!
//! Reads `config.toml` and layers environment overrides on top. Lookup order
//! for the file:
//!
//! 1. an explicit path (the `--config` flag)
//! 2. `$CHATDDX_CONFIG`
//! 3. `<platform config dir>/chatddx/config.toml`
//!
//! A missing file at the default location is not an error: the built-in
//! defaults target a backend on `127.0.0.1:8000`. An explicitly named file
//! must exist and parse.

use std::path::{Path, PathBuf};

use chatddx_core::session::is_valid_language_tag;
use chatddx_types::config::ClientConfig;
use chatddx_types::error::ConfigError;

/// Names the config file to load.
pub const CONFIG_PATH_ENV: &str = "CHATDDX_CONFIG";
/// Overrides `api_ssr`.
pub const API_SSR_ENV: &str = "CHATDDX_API_SSR";
/// Overrides `assets_dir`.
pub const ASSETS_DIR_ENV: &str = "CHATDDX_ASSETS_DIR";

/// Where the config file is looked for when nothing names one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatddx").join("config.toml"))
}

/// Resolve which file to read and whether it is allowed to be missing.
///
/// Returns `(path, required)`.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }

    if let Some(path) = env(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
        return Some((PathBuf::from(path), true));
    }

    default_config_path().map(|path| (path, false))
}

/// Load the effective configuration from the process environment.
pub async fn load_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    load_config_with(explicit, |key| std::env::var(key).ok()).await
}

/// Load the effective configuration, reading environment variables through `env`.
pub async fn load_config_with(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let mut config = match resolve_config_path(explicit, &env) {
        Some((path, required)) => read_config_file(&path, required).await?,
        None => ClientConfig::default(),
    };

    apply_env_overrides(&mut config, &env);
    validate(&config)?;

    Ok(config)
}

async fn read_config_file(path: &Path, required: bool) -> Result<ClientConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return Ok(ClientConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config = toml::from_str::<ClientConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Apply `CHATDDX_API_SSR` and `CHATDDX_ASSETS_DIR`; blank values are ignored.
pub fn apply_env_overrides(config: &mut ClientConfig, env: &impl Fn(&str) -> Option<String>) {
    if let Some(api_ssr) = env(API_SSR_ENV).filter(|v| !v.trim().is_empty()) {
        config.api_ssr = api_ssr.trim().to_string();
    }
    if let Some(assets_dir) = env(ASSETS_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        config.assets_dir = assets_dir;
    }
}

/// Reject configurations the server cannot run with.
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    let api_ssr = config.api_ssr.trim();
    if !(api_ssr.starts_with("http://") || api_ssr.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "api_ssr must be an http(s) URL, got '{}'",
            config.api_ssr
        )));
    }

    if !is_valid_language_tag(&config.default_language) {
        return Err(ConfigError::Invalid(format!(
            "default_language '{}' is not a language tag",
            config.default_language
        )));
    }

    if config.chat_cluster.trim().is_empty() {
        return Err(ConfigError::Invalid("chat_cluster must not be empty".into()));
    }

    if !config.login_path.starts_with('/') {
        return Err(ConfigError::Invalid(format!(
            "login_path must be an absolute path, got '{}'",
            config.login_path
        )));
    }

    if config.backend_timeout_secs == 0 || config.completion_timeout_secs == 0 {
        return Err(ConfigError::Invalid("timeouts must be at least one second".into()));
    }

    Ok(())
}
