mod backup;
mod checks;
mod cli;
mod core;
mod environment;
mod reporters;
mod utils;

use anyhow::{Context as _, Result};
use clap::Parser;
use std::sync::Arc;

use cli::context::Context;
use cli::output::Output;
use cli::{Cli, Commands};
use crate::core::config::{default_config_path, Config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = cli::output::for_terminal(cli.plain);

    if let Err(err) = run(cli, Arc::clone(&output)).await {
        tracing::error!(error = ?err, "command failed");
        output.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Arc<dyn Output>) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    // init must work even when the current file does not parse.
    let config = match &cli.command {
        Commands::Init(_) => Config::default(),
        _ => Config::load(&config_path)
            .with_context(|| format!("Could not load config {}", config_path.display()))?,
    }
    .with_backup_root(cli.backup_root.as_deref());

    crate::core::logging::init(&config.logging.level, cli.verbose)?;
    tracing::debug!(config = %config_path.display(), backup_dir = %config.backup.backup_dir.display(), "configured");

    let ctx = Context {
        config,
        config_path,
        output,
        assume_yes: cli.yes,
    };

    match &cli.command {
        Commands::Create(args) => cli::commands::create::execute(args, &ctx).await?,
        Commands::List(args) => cli::commands::list::execute(args, &ctx).await?,
        Commands::Restore(args) => cli::commands::restore::execute(args, &ctx).await?,
        Commands::Delete(args) => cli::commands::delete::execute(args, &ctx).await?,
        Commands::Cleanup(args) => cli::commands::cleanup::execute(args, &ctx).await?,
        Commands::Verify(args) => cli::commands::verify::execute(args, &ctx).await?,
        Commands::Health(args) => cli::commands::health::execute(args, &ctx).await?,
        Commands::Score(args) => cli::commands::score::execute(args, &ctx).await?,
        Commands::Report(args) => cli::commands::report::execute(args, &ctx).await?,
        Commands::Env(args) => cli::commands::env::execute(args, &ctx).await?,
        Commands::Init(args) => cli::commands::init::execute(args, &ctx).await?,
    }

    Ok(())
}
