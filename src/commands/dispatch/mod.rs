//! Command dispatch logic for cardmatch

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use cardmatch_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::{resolve_store_path, CommandContext};
use command::{Command, NoCommand};

/// Resolve the root path for store discovery, falling back to the working directory
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    let result = match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    };

    debug!(elapsed = ?start.elapsed(), ok = result.is_ok(), "execute_command");
    result
}
