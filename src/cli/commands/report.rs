use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::commands::health::check;
use crate::cli::context::Context;
use crate::core::score::BeautificationReport;
use crate::reporters;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Repository to report on (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Report format
    #[arg(long, default_value = "markdown", value_parser = ["markdown", "json"])]
    pub format: String,

    /// Output file path (auto-generated if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: &ReportArgs, ctx: &Context) -> Result<()> {
    let reporter = reporters::for_format(&args.format)
        .ok_or_else(|| anyhow!("Unknown report format: {}", args.format))?;

    let health = check(&args.path).await?;
    let score = BeautificationReport::calculate(&health.checks);
    let content = reporter.generate(&health, &score)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("repokeeper-report.{}", reporter.extension())));
    std::fs::write(&output_path, &content)
        .with_context(|| format!("Could not write {}", output_path.display()))?;

    ctx.output.success(&format!(
        "{} report written to {}",
        reporter.name(),
        output_path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::testing::context;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_report_writes_json() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("proj");
        fs::create_dir_all(&repo).unwrap();
        let (ctx, _) = context(tmp.path());
        let out = tmp.path().join("report.json");

        let args = ReportArgs {
            path: repo,
            format: "json".to_string(),
            output: Some(out.clone()),
        };
        execute(&args, &ctx).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(parsed["health"]["max_score"], 90);
    }

    #[tokio::test]
    async fn test_report_writes_markdown() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("proj");
        fs::create_dir_all(&repo).unwrap();
        let (ctx, _) = context(tmp.path());
        let out = tmp.path().join("report.md");

        let args = ReportArgs {
            path: repo,
            format: "markdown".to_string(),
            output: Some(out.clone()),
        };
        execute(&args, &ctx).await.unwrap();
        assert!(fs::read_to_string(out).unwrap().contains("## Checks"));
    }
}
