use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::{BackupError, BackupResult};

pub const INDEX_FILENAME: &str = "backup_index.json";
pub const METADATA_FILENAME: &str = "metadata.json";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub backup_id: String,
    pub repo_name: String,
    pub repo_path: PathBuf,
    pub operation: String,
    /// Local time, `YYYYMMDD_HHMMSS`.
    pub timestamp: String,
    pub archive_path: PathBuf,
    pub archive_size: u64,
    pub repo_size: u64,
    pub checksum: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl BackupRecord {
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// Writes the standalone copy of this record next to the archive.
    pub fn write_metadata_file(&self, dir: &Path) -> BackupResult<PathBuf> {
        let path = dir.join(METADATA_FILENAME);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            BackupError::io(&path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(&path, json).map_err(|e| BackupError::io(&path, e))?;
        Ok(path)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    backups: Vec<BackupRecord>,
}

/// The JSON index of every backup, held fully in memory and rewritten whole
/// on each mutation. No locking: concurrent writers race, last one wins.
#[derive(Debug)]
pub struct BackupIndex {
    path: PathBuf,
    document: IndexDocument,
}

impl BackupIndex {
    pub fn load(path: &Path) -> BackupResult<Self> {
        let document = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| BackupError::io(path, e))?;
            serde_json::from_str(&content).map_err(|source| BackupError::Config {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            IndexDocument::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn records(&self) -> &[BackupRecord] {
        &self.document.backups
    }

    pub fn find(&self, backup_id: &str) -> Option<&BackupRecord> {
        self.document.backups.iter().find(|b| b.backup_id == backup_id)
    }

    pub fn contains(&self, backup_id: &str) -> bool {
        self.find(backup_id).is_some()
    }

    pub fn push(&mut self, record: BackupRecord) {
        self.document.backups.push(record);
    }

    pub fn remove(&mut self, backup_id: &str) -> Option<BackupRecord> {
        let pos = self
            .document
            .backups
            .iter()
            .position(|b| b.backup_id == backup_id)?;
        Some(self.document.backups.remove(pos))
    }

    /// Durably replaces the index file: temp file, fsync, rename.
    pub fn save(&self) -> BackupResult<()> {
        let json = serde_json::to_string_pretty(&self.document).map_err(|e| {
            BackupError::io(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(|e| BackupError::io(&tmp_path, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| BackupError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| BackupError::io(&self.path, e))?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<BackupRecord> {
        &mut self.document.backups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn record(id: &str, repo: &str, timestamp: &str) -> BackupRecord {
        BackupRecord {
            backup_id: id.to_string(),
            repo_name: repo.to_string(),
            repo_path: PathBuf::from("/tmp").join(repo),
            operation: "manual".to_string(),
            timestamp: timestamp.to_string(),
            archive_path: PathBuf::from("/tmp/backups").join(id).join(format!("{id}.tar.gz")),
            archive_size: 10,
            repo_size: 20,
            checksum: "00".repeat(32),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_missing_index_is_empty() {
        let tmp = TempDir::new().unwrap();
        let index = BackupIndex::load(&tmp.path().join(INDEX_FILENAME)).unwrap();
        assert!(index.records().is_empty());
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(INDEX_FILENAME);
        let mut index = BackupIndex::load(&path).unwrap();
        index.push(record("b_manual_20240102_000000", "b", "20240102_000000"));
        index.push(record("a_manual_20240101_000000", "a", "20240101_000000"));
        index.save().unwrap();

        let reloaded = BackupIndex::load(&path).unwrap();
        let ids: Vec<_> = reloaded.records().iter().map(|r| r.backup_id.as_str()).collect();
        assert_eq!(ids, vec!["b_manual_20240102_000000", "a_manual_20240101_000000"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(record("x_manual_20240101_000000", "x", "20240101_000000")).unwrap();
        for key in [
            "backup_id",
            "repo_name",
            "repo_path",
            "operation",
            "timestamp",
            "archive_path",
            "archive_size",
            "repo_size",
            "checksum",
            "metadata",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_malformed_index_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(INDEX_FILENAME);
        fs::write(&path, "{ \"backups\": [ {").unwrap();
        assert!(matches!(BackupIndex::load(&path), Err(BackupError::Config { .. })));
    }

    #[test]
    fn test_remove_and_find() {
        let tmp = TempDir::new().unwrap();
        let mut index = BackupIndex::load(&tmp.path().join(INDEX_FILENAME)).unwrap();
        index.push(record("one", "r", "20240101_000000"));
        index.push(record("two", "r", "20240101_000001"));
        assert!(index.contains("two"));
        assert_eq!(index.remove("one").unwrap().backup_id, "one");
        assert!(index.find("one").is_none());
        assert!(index.remove("one").is_none());
        assert_eq!(index.records().len(), 1);
    }

    #[test]
    fn test_created_at_parses_timestamp() {
        let r = record("x", "x", "20240315_134501");
        let ts = r.created_at().unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-15 13:45:01");
        assert!(record("y", "y", "not-a-date").created_at().is_none());
    }
}

#[cfg(test)]
pub(crate) use tests::record as test_record;
