pub mod commands;
pub mod context;
pub mod display;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repokeeper",
    version,
    about = "Back up, restore and health-check your repositories"
)]
pub struct Cli {
    /// Store backups here instead of the configured directory
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_root: Option<PathBuf>,

    /// Config file (defaults to ~/.repokeeper/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Plain text output without colors or spinners
    #[arg(long, global = true)]
    pub plain: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a repository into the backup store
    Create(commands::create::CreateArgs),
    /// List recorded backups
    List(commands::list::ListArgs),
    /// Restore a backup after verifying its checksum
    Restore(commands::restore::RestoreArgs),
    /// Delete a backup and its index record
    Delete(commands::delete::DeleteArgs),
    /// Remove old backups by retention policy
    Cleanup(commands::cleanup::CleanupArgs),
    /// Check a backup's archive against its recorded checksum
    Verify(commands::verify::VerifyArgs),
    /// Run the repository health checks
    Health(commands::health::HealthArgs),
    /// Show the beautification score, level and achievements
    Score(commands::score::ScoreArgs),
    /// Write a health report file
    Report(commands::report::ReportArgs),
    /// Detect git, gh and shells on this machine
    Env(commands::env::EnvArgs),
    /// Write a default config file
    Init(commands::init::InitArgs),
}
