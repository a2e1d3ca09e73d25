use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::core::config::Config;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config (defaults to the active config path)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: &InitArgs, ctx: &Context) -> Result<()> {
    let config_path = args.path.clone().unwrap_or_else(|| ctx.config_path.clone());

    if config_path.exists() && !args.force {
        ctx.output.warn(&format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        ));
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    std::fs::write(&config_path, generate_config(&Config::default()))
        .with_context(|| format!("Could not write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Config created at {}", config_path.display()));
    ctx.output
        .info("Edit it to change the backup location and retention policy.");
    Ok(())
}

fn generate_config(config: &Config) -> String {
    let backup = &config.backup;
    format!(
        r#"# repokeeper configuration

backup:
  # Where archives and the backup index are stored
  backup_dir: "{backup_dir}"
  # cleanup deletes backups older than this many days...
  retention_days: {retention_days}
  # ...but always keeps this many newest backups per repository
  keep_per_repo: {keep_per_repo}
  # gzip level, 0 (none) to 9 (best)
  compression_level: {compression_level}
  # Re-read each archive after writing it
  verify_integrity: {verify_integrity}

logging:
  # tracing filter, e.g. "info" or "repokeeper=debug"
  level: "{level}"

security:
  # Ask before overwriting or deleting anything
  require_confirmations: {require_confirmations}
"#,
        backup_dir = backup.backup_dir.display().to_string().replace('\\', "\\\\"),
        retention_days = backup.retention_days,
        keep_per_repo = backup.keep_per_repo,
        compression_level = backup.compression_level,
        verify_integrity = backup.verify_integrity,
        level = config.logging.level,
        require_confirmations = config.security.require_confirmations,
    )
}
