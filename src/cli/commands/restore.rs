use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::context::Context;
use crate::core::error::BackupError;

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Backup to restore
    pub backup_id: String,

    /// Restore here instead of the original location
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// True for anything at `dest`, including a dangling symlink.
fn destination_occupied(dest: &Path) -> bool {
    fs::symlink_metadata(dest).is_ok()
}

pub async fn execute(args: &RestoreArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.backup_manager()?;
    let record = manager
        .find(&args.backup_id)
        .ok_or_else(|| BackupError::NotFound(format!("Backup not found: {}", args.backup_id)))?;
    let dest = args.path.clone().unwrap_or_else(|| record.repo_path.clone());

    if destination_occupied(&dest)
        && !ctx.confirm(&format!(
            "{} exists and will be moved aside. Continue?",
            dest.display()
        ))?
    {
        ctx.output.warn("Restore cancelled");
        return Ok(());
    }

    let outcome = manager.restore_backup(&args.backup_id, Some(&dest))?;
    if let Some(aside) = outcome.set_aside {
        ctx.output.info(&format!("Previous contents kept at {}", aside.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupRequest;
    use crate::cli::context::testing::context;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_restore_to_new_location() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("proj");
        fs::create_dir_all(&repo).unwrap();
        fs::write(repo.join("a.txt"), "0123456789").unwrap();
        let (ctx, _) = context(tmp.path());
        let record = ctx
            .backup_manager()
            .unwrap()
            .create_backup(&repo, BackupRequest::manual())
            .unwrap();

        let dest = tmp.path().join("restored");
        let args = RestoreArgs {
            backup_id: record.backup_id,
            path: Some(dest.clone()),
        };
        execute(&args, &ctx).await.unwrap();
        assert_eq!(fs::read(dest.join("a.txt")).unwrap(), b"0123456789");
    }

    #[tokio::test]
    async fn test_restore_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let (ctx, _) = context(tmp.path());
        let args = RestoreArgs {
            backup_id: "nope".to_string(),
            path: None,
        };
        let err = execute(&args, &ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_occupied() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();
        assert!(!link.exists());
        assert!(destination_occupied(&link));
        assert!(!destination_occupied(&tmp.path().join("free")));
    }
}
