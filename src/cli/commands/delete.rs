use anyhow::Result;
use clap::Args;

use crate::cli::context::Context;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Backup to remove
    pub backup_id: String,
}

pub async fn execute(args: &DeleteArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.backup_manager()?;
    if manager.find(&args.backup_id).is_some()
        && !ctx.confirm(&format!("Delete backup {}?", args.backup_id))?
    {
        ctx.output.warn("Delete cancelled");
        return Ok(());
    }
    manager.delete_backup(&args.backup_id)?;
    Ok(())
}
