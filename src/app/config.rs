use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, HTTP_REQUEST_TIMEOUT_SECS, SESSION_STORAGE_KEY, SNACKBAR_AUTO_HIDE_MS,
    UI_REFRESH_INTERVAL_MS,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Stack API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Stack API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage key holding the serialized user
    pub storage_key: String,
    /// Directory for the session file (defaults to the runtime dir)
    pub session_dir: Option<PathBuf>,
    /// Keep the session across runs; when false it only lives in memory
    pub persist: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: SESSION_STORAGE_KEY.to_string(),
            session_dir: None,
            persist: true,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIConfig {
    /// How long a snackbar stays visible
    pub snackbar_timeout_ms: u64,
    /// Redraw / input poll interval
    pub tick_rate_ms: u64,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            snackbar_timeout_ms: SNACKBAR_AUTO_HIDE_MS,
            tick_rate_ms: UI_REFRESH_INTERVAL_MS,
        }
    }
}

impl UIConfig {
    pub fn snackbar_timeout(&self) -> Duration {
        Duration::from_millis(self.snackbar_timeout_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl SessionConfig {
    /// Where session files go: configured dir, else the per-login runtime
    /// dir, else the cache dir
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.session_dir {
            return Ok(dir.clone());
        }
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs
            .runtime_dir()
            .unwrap_or_else(|| proj_dirs.cache_dir())
            .join("session"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "stack").context("Could not determine home directory")
}

/// Load configuration from multiple sources
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".stack/config.toml");

    // Build figment configuration
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Add environment variables (STACK_ prefix, STACK_API__BASE_URL style nesting)
    figment = figment.merge(Env::prefixed("STACK_").split("__"));

    // An explicit --config file wins over everything else
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}

/// Directory for log files written while the TUI is running
pub fn get_log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.cache_dir().join("logs"))
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
    }

    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost/api/v1");
        assert_eq!(config.session.storage_key, "stack_session_info");
        assert!(config.session.persist);
        assert_eq!(config.ui.snackbar_timeout(), Duration::from_millis(6000));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[api]
base_url = "https://stack.example.com/api/v1"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(parsed.api.base_url, "https://stack.example.com/api/v1");
        assert_eq!(parsed.session, SessionConfig::default());
    }

    #[test]
    fn test_env_and_explicit_file_layering() {
        Jail::expect_with(|jail| {
            jail.set_env("HOME", jail.directory().display().to_string());
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display().to_string());
            jail.set_env("STACK_UI__TICK_RATE_MS", "100");
            jail.create_file(
                "override.toml",
                r#"
[api]
base_url = "http://override"
timeout_secs = 1
"#,
            )?;

            let config = load_config(Some(Path::new("override.toml"))).unwrap();
            assert_eq!(config.api.base_url, "http://override");
            assert_eq!(config.ui.tick_rate_ms, 100);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|jail| {
            jail.set_env("HOME", jail.directory().display().to_string());
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display().to_string());
            assert!(load_config(Some(Path::new("missing.toml"))).is_err());
            Ok(())
        });
    }
}
