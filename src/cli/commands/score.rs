use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::commands::health::check;
use crate::cli::context::Context;
use crate::cli::display::render_score;
use crate::core::score::BeautificationReport;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Repository to score (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(args: &ScoreArgs, ctx: &Context) -> Result<()> {
    let health = check(&args.path).await?;
    let score = BeautificationReport::calculate(&health.checks);
    tracing::info!(level = %score.level, percentage = score.percentage, "scored repository");

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        render_score(ctx.output.as_ref(), &score);
    }
    Ok(())
}
