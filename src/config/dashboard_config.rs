use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::domain::AnalysisModel;
use crate::services::error_handling::{DashboardError, DashboardResult};

pub const BASE_URL_ENV: &str = "JOBBOARD_BASE_URL";
pub const MODEL_ENV: &str = "JOBBOARD_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root of the job store API (`/jobs`, `/techs`, `/analyze` hang off it)
    pub base_url: String,

    /// Model requested for new analyses
    pub default_model: AnalysisModel,

    /// Per-request timeout (in seconds)
    pub timeout_seconds: u64,

    /// Whether deletes ask for confirmation first
    pub confirm_deletes: bool,

    /// Log level for the command line front end
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            default_model: AnalysisModel::Anthropic,
            timeout_seconds: 30,
            confirm_deletes: true,
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the user's config directory, writing the
    /// defaults there on first use.
    pub fn load() -> DashboardResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            Ok(default_config)
        }
    }

    /// Load configuration from an explicit file. A missing file yields the
    /// defaults and is not created.
    pub fn load_from(path: &Path) -> DashboardResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|err| DashboardError::Config {
            message: format!("{}: {err}", path.display()),
        })?;
        toml::from_str(&content).map_err(|err| DashboardError::Config {
            message: format!("{}: {err}", path.display()),
        })
    }

    pub fn save_to(&self, path: &Path) -> DashboardResult<()> {
        let config_error = |err: &dyn std::fmt::Display| DashboardError::Config {
            message: format!("{}: {err}", path.display()),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| config_error(&err))?;
        }
        let content = toml::to_string_pretty(self).map_err(|err| config_error(&err))?;
        std::fs::write(path, content).map_err(|err| config_error(&err))?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> DashboardResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| DashboardError::Config {
            message: "Could not determine config directory".to_string(),
        })?;

        Ok(config_dir.join("jobboard").join("config.toml"))
    }

    /// Applies `JOBBOARD_BASE_URL` and `JOBBOARD_MODEL` from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> DashboardResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|value| !value.trim().is_empty()) {
            self.default_model = model
                .parse()
                .map_err(|message| DashboardError::Config { message })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://jobs.local:9000\"\ndefault_model = \"openai\"\n")
            .unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://jobs.local:9000");
        assert_eq!(config.default_model, AnalysisModel::OpenAi);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.confirm_deletes);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = DashboardConfig {
            timeout_seconds: 5,
            confirm_deletes: false,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_seconds = \"soon\"").unwrap();

        let err = DashboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DashboardConfig::default();
        config
            .apply_env_overrides(|key| match key {
                BASE_URL_ENV => Some("http://remote:8000".to_string()),
                MODEL_ENV => Some("openai".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.base_url, "http://remote:8000");
        assert_eq!(config.default_model, AnalysisModel::OpenAi);
    }

    #[test]
    fn test_unknown_model_override_is_rejected() {
        let mut config = DashboardConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == MODEL_ENV).then(|| "llama".to_string())
        });
        assert!(result.is_err());
    }
}
