use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

use crate::backup::manager::BackupManager;
use crate::cli::output::Output;
use crate::core::config::Config;

/// Built once in `main` and handed to every command.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub output: Arc<dyn Output>,
    pub assume_yes: bool,
}

impl Context {
    pub fn backup_manager(&self) -> Result<BackupManager> {
        BackupManager::open(&self.config.backup, Arc::clone(&self.output)).with_context(|| {
            format!(
                "Could not open backup store at {}",
                self.config.backup.backup_dir.display()
            )
        })
    }

    /// Asks before a destructive step unless confirmations are off.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes || !self.config.security.require_confirmations {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Confirmation needs an interactive terminal; pass --yes to skip it")
    }
}
