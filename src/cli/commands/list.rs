use anyhow::Result;
use clap::Args;

use crate::cli::context::Context;
use crate::cli::display::render_backups;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only backups whose repository name contains this text
    #[arg(long)]
    pub repo: Option<String>,

    /// Only backups with exactly this operation tag
    #[arg(long)]
    pub operation: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(args: &ListArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.backup_manager()?;
    let records = manager.list_backups(args.repo.as_deref(), args.operation.as_deref());

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        render_backups(ctx.output.as_ref(), &records);
    }
    Ok(())
}
