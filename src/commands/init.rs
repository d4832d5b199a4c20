//! `cardmatch init` - create a store

use cardmatch_core::error::Result;
use cardmatch_core::store::{Store, DEFAULT_STORE_DIR};

use super::dispatch::{resolve_store_path, CommandContext};
use super::output::print_json;
use crate::cli::OutputFormat;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let store_root = match &ctx.cli.store {
        Some(path) => resolve_store_path(path, ctx.root),
        None => ctx.root.join(DEFAULT_STORE_DIR),
    };

    let store = Store::init(&store_root)?;

    match ctx.cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "store": store.root().display().to_string(),
            "threshold": store.config().matching.threshold,
        })),
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!("Initialized cardmatch store at {}", store.root().display());
            }
            Ok(())
        }
    }
}
