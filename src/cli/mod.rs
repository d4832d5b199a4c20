//! CLI argument parsing for cardmatch
//!
//! Global flags: --root, --store, --owner, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod card;
pub mod matching;
pub mod parse;
pub mod project;
pub mod tech;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub use card::CardCommands;
pub use matching::MatchCommands;
pub use project::ProjectCommands;
pub use tech::TechCommands;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// cardmatch - score, search and assign teams of cards to projects
#[derive(Parser, Debug)]
#[command(name = "cardmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Owner on whose behalf projects, cards and assignments are managed
    #[arg(long, global = true, env = "CARDMATCH_OWNER")]
    pub owner: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `cardmatch_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new cardmatch store
    Init,

    /// Manage the technology catalog
    Tech(TechSubcommand),

    /// Manage projects
    Project(ProjectSubcommand),

    /// Manage cards
    Card(CardSubcommand),

    /// Preview, create, search and dissolve assignments
    Match(MatchSubcommand),
}

#[derive(Args, Debug)]
pub struct TechSubcommand {
    #[command(subcommand)]
    pub command: TechCommands,
}

#[derive(Args, Debug)]
pub struct ProjectSubcommand {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Args, Debug)]
pub struct CardSubcommand {
    #[command(subcommand)]
    pub command: CardCommands,
}

#[derive(Args, Debug)]
pub struct MatchSubcommand {
    #[command(subcommand)]
    pub command: MatchCommands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match_create() {
        let cli = Cli::try_parse_from([
            "cardmatch", "--owner", "alice", "match", "create", "3", "7", "9",
        ])
        .unwrap();
        assert_eq!(cli.owner.as_deref(), Some("alice"));
        match cli.command {
            Some(Commands::Match(MatchSubcommand {
                command: MatchCommands::Create { project, cards },
            })) => {
                assert_eq!(project, 3);
                assert_eq!(cards, vec![7, 9]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_levels() {
        let cli = Cli::try_parse_from([
            "cardmatch", "project", "create", "Portal", "--level", "1=8", "--level", "2=6",
        ])
        .unwrap();
        let Some(Commands::Project(ProjectSubcommand {
            command: ProjectCommands::Create(args),
        })) = cli.command
        else {
            panic!("expected project create");
        };
        assert_eq!(args.level.len(), 2);
        assert_eq!(args.level[1].tech_id, 2);
        assert_eq!(args.level[1].level, 6);
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(Cli::try_parse_from(["cardmatch", "project", "create", "P", "--level", "1=11"])
            .is_err());
    }
}
