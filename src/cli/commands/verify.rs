use anyhow::Result;
use clap::Args;

use crate::cli::context::Context;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Backup to check
    pub backup_id: String,
}

pub async fn execute(args: &VerifyArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.backup_manager()?;
    let record = manager.verify_backup(&args.backup_id)?;
    ctx.output.success(&format!(
        "Backup {} is intact (sha256 {})",
        record.backup_id, record.checksum
    ));
    Ok(())
}
