use anyhow::Result;
use clap::Args;

use crate::cli::context::Context;
use crate::cli::display::render_environment;
use crate::environment::detector::ToolDetector;

#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(args: &EnvArgs, ctx: &Context) -> Result<()> {
    let report = {
        let progress = ctx.output.activity("Detecting tools...");
        let report = ToolDetector::default().detect().await;
        progress.finish();
        report
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_environment(ctx.output.as_ref(), &report);
    }
    Ok(())
}
