//! CLI settings
//!
//! Layered as defaults, then the TOML file, then `FOLHA_*` environment
//! variables (`FOLHA_API__BASE_URL`, `FOLHA_SESSION__REFRESH_SKEW_SECS`, ...).

use anyhow::{Context, Result};
use folha_http::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state_dir::StateDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Backend base URL including the `/api` prefix
    pub base_url: String,
    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Refresh access tokens this many seconds before they expire
    pub refresh_skew_secs: i64,
    /// Session file, defaults to the data directory
    pub token_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
                user_agent: None,
            },
            session: SessionSettings {
                refresh_skew_secs: folha_core::session::DEFAULT_REFRESH_SKEW_SECS,
                token_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given or the default file if present
    pub fn load(path: Option<&Path>, state_dir: &StateDir) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("session.refresh_skew_secs", defaults.session.refresh_skew_secs)?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::from(state_dir.config_file()).required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix("FOLHA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let settings: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url cannot be empty");
        }
        if self.session.refresh_skew_secs < 0 {
            anyhow::bail!("session.refresh_skew_secs cannot be negative");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.api.timeout_secs > 0).then(|| Duration::from_secs(self.api.timeout_secs))
    }

    pub fn refresh_skew(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session.refresh_skew_secs)
    }

    pub fn token_file(&self, state_dir: &StateDir) -> PathBuf {
        self.session
            .token_file
            .clone()
            .unwrap_or_else(|| state_dir.session_file())
    }
}

/// Write the default settings as TOML
pub fn generate_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(&Settings::default())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = StateDir::with_override(dir.path());
        let settings = Settings::load(None, &state_dir).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.refresh_skew(), chrono::Duration::minutes(5));
        assert_eq!(settings.token_file(&state_dir), state_dir.session_file());
    }

    #[test]
    fn test_generated_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = StateDir::with_override(dir.path());
        let path = state_dir.config_file();

        generate_default_config(&path, false).unwrap();
        assert!(generate_default_config(&path, false).is_err());
        generate_default_config(&path, true).unwrap();

        let settings = Settings::load(Some(&path), &state_dir).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://folha.example.com/api\"\ntimeout_secs = 0\n\n[session]\nrefresh_skew_secs = 60\ntoken_file = \"/tmp/s.json\"\n",
        )
        .unwrap();

        let state_dir = StateDir::with_override(dir.path());
        let settings = Settings::load(Some(&path), &state_dir).unwrap();
        assert_eq!(settings.api.base_url, "https://folha.example.com/api");
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.refresh_skew(), chrono::Duration::seconds(60));
        assert_eq!(settings.token_file(&state_dir), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = StateDir::with_override(dir.path());
        assert!(Settings::load(Some(&dir.path().join("absent.toml")), &state_dir).is_err());
    }
}
