use chrono::{Duration, Local, NaiveDateTime};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backup::archive;
use crate::backup::checksum::sha256_file;
use crate::backup::index::{BackupIndex, BackupRecord, INDEX_FILENAME, TIMESTAMP_FORMAT};
use crate::cli::output::Output;
use crate::core::config::BackupSettings;
use crate::core::error::{BackupError, BackupResult};
use crate::utils::fs::{dir_size, human_size};

/// Lifecycle of a single `create_backup` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Requested,
    Archiving,
    Checksumming,
    Indexed,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Requested => write!(f, "requested"),
            Stage::Archiving => write!(f, "archiving"),
            Stage::Checksumming => write!(f, "checksumming"),
            Stage::Indexed => write!(f, "indexed"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackupRequest {
    pub name: Option<String>,
    pub operation: String,
    pub metadata: BTreeMap<String, Value>,
}

impl BackupRequest {
    pub fn manual() -> Self {
        Self {
            operation: "manual".to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestoreOutcome {
    pub restored_to: PathBuf,
    /// Where a pre-existing destination was moved before extraction.
    pub set_aside: Option<PathBuf>,
}

pub struct BackupManager {
    root: PathBuf,
    settings: BackupSettings,
    index: BackupIndex,
    output: Arc<dyn Output>,
}

fn sanitize(part: &str) -> String {
    part.replace(['/', '\\'], "_")
}

fn not_found(what: &str, value: impl std::fmt::Display) -> BackupError {
    BackupError::NotFound(format!("{what}: {value}"))
}

impl BackupManager {
    /// Creates the backup root if needed and loads its index.
    pub fn open(settings: &BackupSettings, output: Arc<dyn Output>) -> BackupResult<Self> {
        let root = settings.backup_dir.clone();
        fs::create_dir_all(&root).map_err(|e| BackupError::io(&root, e))?;
        let index = BackupIndex::load(&root.join(INDEX_FILENAME))?;
        tracing::debug!(root = %root.display(), backups = index.records().len(), "opened backup store");

        Ok(Self {
            root,
            settings: settings.clone(),
            index,
            output,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[BackupRecord] {
        self.index.records()
    }

    pub fn find(&self, backup_id: &str) -> Option<&BackupRecord> {
        self.index.find(backup_id)
    }

    pub fn create_backup(
        &mut self,
        source: &Path,
        request: BackupRequest,
    ) -> BackupResult<BackupRecord> {
        self.create_backup_at(source, request, Local::now().naive_local())
    }

    fn create_backup_at(
        &mut self,
        source: &Path,
        mut request: BackupRequest,
        now: NaiveDateTime,
    ) -> BackupResult<BackupRecord> {
        if !source.exists() {
            return Err(not_found("Repository not found", source.display()));
        }
        let source = source
            .canonicalize()
            .map_err(|e| BackupError::io(source, e))?;

        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let repo_name = match request.name.take() {
            Some(name) => name,
            None => archive::top_level_name(&source)
                .map_err(|e| BackupError::io(&source, e))?
                .to_string_lossy()
                .into_owned(),
        };
        let backup_id = format!(
            "{}_{}_{}",
            sanitize(&repo_name),
            sanitize(&request.operation),
            timestamp
        );
        tracing::debug!(%backup_id, stage = %Stage::Requested);

        if self.index.contains(&backup_id) {
            return Err(BackupError::AlreadyExists(backup_id));
        }

        let backup_dir = self.root.join(&backup_id);
        if backup_dir.exists() {
            return Err(BackupError::AlreadyExists(format!(
                "{} (directory {} is in the way)",
                backup_id,
                backup_dir.display()
            )));
        }
        fs::create_dir_all(&backup_dir).map_err(|e| BackupError::io(&backup_dir, e))?;

        self.output.info(&format!("Creating backup: {}", backup_id));
        let result = self.write_backup(&source, &backup_dir, &backup_id, &repo_name, &timestamp, request);

        match result {
            Ok(record) => {
                tracing::info!(backup_id = %record.backup_id, stage = %Stage::Indexed, "backup created");
                self.output.success(&format!("Backup created: {}", record.backup_id));
                self.output.info(&format!("  Location: {}", record.archive_path.display()));
                self.output.info(&format!(
                    "  Size: {} (compressed from {})",
                    human_size(record.archive_size),
                    human_size(record.repo_size)
                ));
                self.output.info(&format!("  Checksum: {}...", &record.checksum[..16]));
                Ok(record)
            }
            Err(err) => {
                tracing::debug!(%backup_id, stage = %Stage::Failed, error = %err);
                if let Err(cleanup) = fs::remove_dir_all(&backup_dir) {
                    tracing::warn!(dir = %backup_dir.display(), error = %cleanup, "could not remove partial backup");
                }
                Err(err)
            }
        }
    }

    fn write_backup(
        &mut self,
        source: &Path,
        backup_dir: &Path,
        backup_id: &str,
        repo_name: &str,
        timestamp: &str,
        request: BackupRequest,
    ) -> BackupResult<BackupRecord> {
        let archive_path = backup_dir.join(format!("{}.tar.gz", backup_id));

        tracing::debug!(%backup_id, stage = %Stage::Archiving);
        {
            let progress = self.output.activity("Compressing repository...");
            archive::create(source, &archive_path, self.settings.compression_level)
                .map_err(|e| BackupError::io(&archive_path, e))?;
            if self.settings.verify_integrity {
                progress.set_message("Verifying archive...");
                archive::entry_count(&archive_path)
                    .map_err(|e| BackupError::io(&archive_path, e))?;
            }
            progress.finish();
        }

        tracing::debug!(%backup_id, stage = %Stage::Checksumming);
        let checksum = sha256_file(&archive_path).map_err(|e| BackupError::io(&archive_path, e))?;
        let archive_size = fs::metadata(&archive_path)
            .map_err(|e| BackupError::io(&archive_path, e))?
            .len();
        let repo_size = dir_size(source).map_err(|e| BackupError::io(source, e))?;

        let record = BackupRecord {
            backup_id: backup_id.to_string(),
            repo_name: repo_name.to_string(),
            repo_path: source.to_path_buf(),
            operation: request.operation,
            timestamp: timestamp.to_string(),
            archive_path,
            archive_size,
            repo_size,
            checksum,
            metadata: request.metadata,
        };
        record.write_metadata_file(backup_dir)?;

        self.index.push(record.clone());
        if let Err(err) = self.index.save() {
            self.index.remove(backup_id);
            return Err(err);
        }
        Ok(record)
    }

    /// Index order; `repo` matches as a substring, `operation` exactly.
    pub fn list_backups(&self, repo: Option<&str>, operation: Option<&str>) -> Vec<&BackupRecord> {
        self.index
            .records()
            .iter()
            .filter(|b| repo.map_or(true, |r| b.repo_name.contains(r)))
            .filter(|b| operation.map_or(true, |op| b.operation == op))
            .collect()
    }

    /// Recomputes the archive checksum and compares it to the recorded one.
    pub fn verify_backup(&self, backup_id: &str) -> BackupResult<&BackupRecord> {
        let record = self
            .index
            .find(backup_id)
            .ok_or_else(|| not_found("Backup not found", backup_id))?;

        if !record.archive_path.is_file() {
            return Err(not_found("Backup archive not found", record.archive_path.display()));
        }

        let actual = sha256_file(&record.archive_path)
            .map_err(|e| BackupError::io(&record.archive_path, e))?;
        if actual != record.checksum {
            return Err(BackupError::Integrity {
                backup_id: backup_id.to_string(),
                expected: record.checksum.clone(),
                actual,
            });
        }
        Ok(record)
    }

    /// Restores into `dest`, or the original location when `None`.
    pub fn restore_backup(&self, backup_id: &str, dest: Option<&Path>) -> BackupResult<RestoreOutcome> {
        self.output.info("Verifying backup integrity...");
        let record = self.verify_backup(backup_id)?;
        self.output.success("Backup integrity verified");

        let dest = dest.map(Path::to_path_buf).unwrap_or_else(|| record.repo_path.clone());
        let dest_name = dest
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| {
                BackupError::io(
                    &dest,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "restore path has no directory name"),
                )
            })?;
        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| BackupError::io(&parent, e))?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let set_aside = if fs::symlink_metadata(&dest).is_ok() {
            let mut aside_name = dest_name.clone();
            aside_name.push(format!(".bak.{}", stamp));
            let aside = parent.join(aside_name);
            if fs::symlink_metadata(&aside).is_ok() {
                return Err(BackupError::AlreadyExists(aside.display().to_string()));
            }
            fs::rename(&dest, &aside).map_err(|e| BackupError::io(&dest, e))?;
            self.output.info(&format!("Existing directory moved to: {}", aside.display()));
            Some(aside)
        } else {
            None
        };

        let mut staging_name = std::ffi::OsString::from(".");
        staging_name.push(&dest_name);
        staging_name.push(format!(".restore.{}", stamp));
        let staging = parent.join(staging_name);

        self.output.info(&format!("Restoring to: {}", dest.display()));
        let extracted = {
            let progress = self.output.activity("Extracting archive...");
            let result = self.extract_into(record, &staging, &dest);
            progress.finish();
            result
        };

        if let Err(err) = extracted {
            let _ = fs::remove_dir_all(&staging);
            if let Some(aside) = &set_aside {
                if fs::symlink_metadata(&dest).is_err() {
                    if let Err(e) = fs::rename(aside, &dest) {
                        tracing::warn!(aside = %aside.display(), error = %e, "could not move previous directory back");
                    }
                }
            }
            return Err(err);
        }

        tracing::info!(%backup_id, dest = %dest.display(), "backup restored");
        self.output.success("Backup restored successfully!");
        self.output.info(&format!("  Location: {}", dest.display()));
        Ok(RestoreOutcome {
            restored_to: dest,
            set_aside,
        })
    }

    fn extract_into(&self, record: &BackupRecord, staging: &Path, dest: &Path) -> BackupResult<()> {
        fs::create_dir(staging).map_err(|e| BackupError::io(staging, e))?;
        archive::extract(&record.archive_path, staging)
            .map_err(|e| BackupError::io(&record.archive_path, e))?;

        let top = match record.repo_path.file_name().map(|n| staging.join(n)) {
            Some(path) if path.exists() => path,
            _ => {
                let entries: Vec<PathBuf> = fs::read_dir(staging)
                    .map_err(|e| BackupError::io(staging, e))?
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .collect();
                match entries.as_slice() {
                    [only] => only.clone(),
                    _ => {
                        return Err(BackupError::io(
                            staging,
                            std::io::Error::new(
                                std::io::ErrorKind::InvalidData,
                                "archive does not hold a single top-level directory",
                            ),
                        ))
                    }
                }
            }
        };

        fs::rename(&top, dest).map_err(|e| BackupError::io(dest, e))?;
        fs::remove_dir_all(staging).map_err(|e| BackupError::io(staging, e))?;
        Ok(())
    }

    /// Removes the archive directory, then the index record.
    pub fn delete_backup(&mut self, backup_id: &str) -> BackupResult<BackupRecord> {
        let record = self
            .index
            .find(backup_id)
            .cloned()
            .ok_or_else(|| not_found("Backup not found", backup_id))?;

        self.remove_archive(&record)?;

        let removed = self.index.remove(backup_id).unwrap_or(record);
        if let Err(err) = self.index.save() {
            return Err(BackupError::Inconsistent {
                backup_id: backup_id.to_string(),
                source: Box::new(err),
            });
        }

        tracing::info!(%backup_id, "backup deleted");
        self.output.success(&format!("Backup deleted: {}", backup_id));
        Ok(removed)
    }

    fn remove_archive(&self, record: &BackupRecord) -> BackupResult<()> {
        let owned_dir = record
            .archive_path
            .parent()
            .filter(|dir| dir.starts_with(&self.root) && *dir != self.root.as_path());

        match owned_dir {
            Some(dir) if dir.exists() => {
                fs::remove_dir_all(dir).map_err(|e| BackupError::io(dir, e))?;
            }
            Some(_) => {
                tracing::warn!(backup_id = %record.backup_id, "backup directory already gone");
            }
            None if record.archive_path.exists() => {
                fs::remove_file(&record.archive_path)
                    .map_err(|e| BackupError::io(&record.archive_path, e))?;
            }
            None => {
                tracing::warn!(backup_id = %record.backup_id, "backup archive already gone");
            }
        }
        Ok(())
    }

    /// Per repository, keeps the newest `keep_count` backups unconditionally and
    /// deletes the rest that are older than `retention_days`.
    pub fn cleanup_old_backups(&mut self, retention_days: u32, keep_count: usize) -> BackupResult<usize> {
        self.cleanup_old_backups_at(retention_days, keep_count, Local::now().naive_local())
    }

    fn cleanup_old_backups_at(
        &mut self,
        retention_days: u32,
        keep_count: usize,
        now: NaiveDateTime,
    ) -> BackupResult<usize> {
        let doomed = expired_backups(self.index.records(), retention_days, keep_count, now);

        let mut deleted = 0;
        for backup_id in doomed {
            self.output.info(&format!("Deleting old backup: {}", backup_id));
            match self.delete_backup(&backup_id) {
                Ok(_) => deleted += 1,
                Err(err @ BackupError::Inconsistent { .. }) => return Err(err),
                Err(err) => {
                    tracing::warn!(%backup_id, error = %err, "cleanup skipped backup");
                    self.output.warn(&format!("Could not delete {}: {}", backup_id, err));
                }
            }
        }

        self.output.success(&format!("Cleaned up {} old backups", deleted));
        Ok(deleted)
    }
}

/// Ids selected for deletion by the retention policy, newest first within each repo.
pub fn expired_backups(
    records: &[BackupRecord],
    retention_days: u32,
    keep_count: usize,
    now: NaiveDateTime,
) -> Vec<String> {
    // A cutoff before the earliest representable date means nothing is old enough.
    let Some(cutoff) = Duration::try_days(i64::from(retention_days))
        .and_then(|age| now.checked_sub_signed(age))
    else {
        return Vec::new();
    };

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&BackupRecord>> = HashMap::new();
    for record in records {
        let group = groups.entry(record.repo_name.as_str()).or_insert_with(|| {
            order.push(record.repo_name.as_str());
            Vec::new()
        });
        group.push(record);
    }

    let mut doomed = Vec::new();
    for repo in order {
        let mut dated = Vec::new();
        for record in groups.remove(repo).unwrap_or_default() {
            match record.created_at() {
                Some(created) => dated.push((created, record)),
                None => {
                    tracing::warn!(backup_id = %record.backup_id, timestamp = %record.timestamp, "unparseable timestamp, keeping");
                }
            }
        }
        // Stable: equal timestamps keep index order.
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        doomed.extend(
            dated
                .into_iter()
                .skip(keep_count)
                .filter(|(created, _)| *created < cutoff)
                .map(|(_, record)| record.backup_id.clone()),
        );
    }
    doomed
}
