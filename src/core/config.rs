use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;

pub const CONFIG_FILENAME: &str = "config.yaml";

/// Directory holding the default config file and backup store.
pub fn app_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".repokeeper")
}

pub fn default_config_path() -> PathBuf {
    app_home().join(CONFIG_FILENAME)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backup: BackupSettings,
    pub logging: LoggingSettings,
    pub security: SecuritySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupSettings {
    pub backup_dir: PathBuf,
    pub retention_days: u32,
    pub keep_per_repo: usize,
    pub compression_level: u32,
    pub verify_integrity: bool,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            backup_dir: app_home().join("backups"),
            retention_days: 30,
            keep_per_repo: 10,
            compression_level: 9,
            verify_integrity: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `warn` or `repokeeper=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecuritySettings {
    pub require_confirmations: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            require_confirmations: true,
        }
    }
}

impl Config {
    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backup.compression_level > 9 {
            return Err(ConfigError::Invalid {
                field: "backup.compression_level",
                reason: format!("{} is outside 0..=9", self.backup.compression_level),
            });
        }
        if self.backup.keep_per_repo == 0 {
            return Err(ConfigError::Invalid {
                field: "backup.keep_per_repo",
                reason: "must keep at least one backup per repository".to_string(),
            });
        }
        if self.backup.backup_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "backup.backup_dir",
                reason: "must not be empty".to_string(),
            });
        }
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: format!("'{}' is not a valid log filter", self.logging.level),
            });
        }
        Ok(())
    }

    pub fn with_backup_root(mut self, root: Option<&Path>) -> Self {
        if let Some(root) = root {
            self.backup.backup_dir = root.to_path_buf();
        }
        self
    }
}
