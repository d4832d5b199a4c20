//! `cardmatch tech` - technology catalog

use cardmatch_core::error::Result;
use cardmatch_core::model::TechnologyId;
use cardmatch_core::store::Store;

use super::output::print_json;
use crate::cli::{Cli, OutputFormat};

pub fn add(cli: &Cli, store: &Store, name: &str, kind: &str) -> Result<()> {
    let technology = store.add_technology(name, kind)?;
    match cli.format {
        OutputFormat::Json => print_json(&technology),
        OutputFormat::Human => {
            println!("{}", technology.id);
            if !cli.quiet {
                println!("Added technology {} ({})", technology.name, technology.kind);
            }
            Ok(())
        }
    }
}

pub fn list(cli: &Cli, store: &Store) -> Result<()> {
    let technologies = store.list_technologies()?;
    match cli.format {
        OutputFormat::Json => print_json(&technologies),
        OutputFormat::Human => {
            if technologies.is_empty() && !cli.quiet {
                println!("No technologies");
            }
            for t in &technologies {
                println!("{:>4}  {} ({})", t.id, t.name, t.kind);
            }
            Ok(())
        }
    }
}

pub fn remove(cli: &Cli, store: &Store, id: TechnologyId) -> Result<()> {
    store.remove_technology(id)?;
    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "removed": id })),
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Removed technology {}", id);
            }
            Ok(())
        }
    }
}
