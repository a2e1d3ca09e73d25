use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::display::render_health;
use crate::core::checker::{default_checker, HealthReport};
use crate::core::project::Repository;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Repository to check (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn check(path: &std::path::Path) -> Result<HealthReport> {
    let repo = Repository::new(path)
        .with_context(|| format!("Cannot check repository at {}", path.display()))?;
    if !repo.has_git {
        tracing::debug!(path = %repo.path.display(), "not a git working tree");
    }
    Ok(default_checker().run(&repo).await)
}

pub async fn execute(args: &HealthArgs, ctx: &Context) -> Result<()> {
    let report = {
        let progress = ctx.output.activity("Checking repository...");
        let report = check(&args.path).await?;
        progress.finish();
        report
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_health(ctx.output.as_ref(), &report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::testing::context;
    use crate::cli::output::Status;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_health_table_output() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("proj");
        fs::create_dir_all(&repo).unwrap();
        fs::write(repo.join("LICENSE"), "MIT").unwrap();
        let (ctx, recorder) = context(tmp.path());

        let args = HealthArgs {
            path: repo,
            format: "table".to_string(),
        };
        execute(&args, &ctx).await.unwrap();
        assert!(recorder.contains(Status::Info, "Overall score: 18/90"));
        assert!(recorder.contains(Status::Error, "README.md"));
    }

    #[tokio::test]
    async fn test_health_missing_path() {
        let tmp = TempDir::new().unwrap();
        assert!(check(&tmp.path().join("absent")).await.is_err());
    }
}
