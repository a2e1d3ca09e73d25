use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backup already exists: {0}")]
    AlreadyExists(String),

    #[error("Integrity check failed for {backup_id}: expected checksum {expected}, found {actual}")]
    Integrity {
        backup_id: String,
        expected: String,
        actual: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup index {path} is malformed: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive for {backup_id} was removed but the index could not be rewritten; it still lists the backup: {source}")]
    Inconsistent {
        backup_id: String,
        #[source]
        source: Box<BackupError>,
    },
}

impl BackupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackupError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type BackupResult<T> = std::result::Result<T, BackupError>;
