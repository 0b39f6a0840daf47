//! Platform-specific directories for configuration, session and logs

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable overriding every directory below
pub const STATE_DIR_ENV: &str = "FOLHA_STATE_DIR";

/// Resolves where the CLI keeps its files
pub struct StateDir {
    /// Project directories from the directories crate
    project_dirs: Option<ProjectDirs>,
    /// Override directory for testing or custom installations
    override_dir: Option<PathBuf>,
}

impl StateDir {
    /// Platform directories, or `FOLHA_STATE_DIR` when set
    pub fn new() -> Self {
        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            return Self::with_override(dir);
        }

        let project_dirs = ProjectDirs::from("br.com", "Techne", "Folha");
        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }

        Self {
            project_dirs,
            override_dir: None,
        }
    }

    /// Keep everything under a single directory
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            project_dirs: None,
            override_dir: Some(path.into()),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("config");
        }

        if let Some(project_dirs) = &self.project_dirs {
            project_dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from("./config")
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("data");
        }

        if let Some(project_dirs) = &self.project_dirs {
            project_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("./data")
        }
    }

    /// Default configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("folha.toml")
    }

    /// Default location of the persisted session
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("folha.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_layout() {
        let dir = StateDir::with_override("/tmp/folha-test");
        assert_eq!(dir.config_file(), PathBuf::from("/tmp/folha-test/config/folha.toml"));
        assert_eq!(dir.session_file(), PathBuf::from("/tmp/folha-test/data/session.json"));
        assert_eq!(dir.log_file(), PathBuf::from("/tmp/folha-test/data/folha.log"));
    }
}
