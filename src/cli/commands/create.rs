use anyhow::{bail, Result};
use clap::Args;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::backup::manager::BackupRequest;
use crate::cli::context::Context;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository directory to back up
    pub path: PathBuf,

    /// Name to file the backup under (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Operation tag, e.g. "manual" or "pre-delete"
    #[arg(long, default_value = "manual")]
    pub operation: String,

    /// Extra metadata as key=value (repeatable)
    #[arg(long = "metadata", value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,
}

/// Values that parse as JSON keep their type; anything else is a string.
fn parse_metadata(pairs: &[String]) -> Result<BTreeMap<String, Value>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Invalid metadata '{}', expected KEY=VALUE", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid metadata '{}', key is empty", pair);
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

pub async fn execute(args: &CreateArgs, ctx: &Context) -> Result<()> {
    let request = BackupRequest {
        name: args.name.clone(),
        operation: args.operation.clone(),
        metadata: parse_metadata(&args.metadata)?,
    };
    let mut manager = ctx.backup_manager()?;
    manager.create_backup(&args.path, request)?;
    Ok(())
}
