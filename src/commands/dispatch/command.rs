//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use cardmatch_core::bail_usage;
use cardmatch_core::error::Result;
use cardmatch_core::store::Store;

/// Resolve `--store` against the root, or discover a store upward from it
pub fn discover_or_open_store(cli: &Cli, root: &Path) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(&resolve_store_path(path, root)),
        None => Store::discover(root),
    }
}

pub fn resolve_store_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a Path,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a Path, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn discover_or_open_store(&self) -> Result<Store> {
        let store = discover_or_open_store(self.cli, self.root)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), store = %store.root().display(), "discover_store");
        Ok(store)
    }

    /// The acting owner; owner-scoped commands fail without one
    pub fn owner(&self) -> Result<&'a str> {
        match self.cli.owner.as_deref().map(str::trim) {
            Some(owner) if !owner.is_empty() => Ok(owner),
            _ => bail_usage!("this command needs an owner: pass --owner or set CARDMATCH_OWNER"),
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("cardmatch {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Score, search and assign teams of cards to projects.");
        println!();
        println!("Run `cardmatch --help` for usage information.");
        Ok(())
    }
}
