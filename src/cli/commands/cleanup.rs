use anyhow::Result;
use chrono::Local;
use clap::Args;

use crate::backup::manager::expired_backups;
use crate::cli::context::Context;

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Delete backups older than this many days (config default when omitted)
    #[arg(long)]
    pub days: Option<u32>,

    /// Always keep this many newest backups per repository
    #[arg(long)]
    pub keep: Option<usize>,

    /// Show what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn execute(args: &CleanupArgs, ctx: &Context) -> Result<()> {
    let days = args.days.unwrap_or(ctx.config.backup.retention_days);
    let keep = args.keep.unwrap_or(ctx.config.backup.keep_per_repo);
    let mut manager = ctx.backup_manager()?;

    if args.dry_run {
        let doomed = expired_backups(manager.records(), days, keep, Local::now().naive_local());
        if doomed.is_empty() {
            ctx.output.info("Nothing to clean up");
        }
        for id in &doomed {
            ctx.output.line(&format!("  would delete {}", id));
        }
        return Ok(());
    }

    tracing::info!(days, keep, "cleaning up backups");
    manager.cleanup_old_backups(days, keep)?;
    Ok(())
}
