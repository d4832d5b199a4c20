//! Technology catalog subcommands

use clap::Subcommand;

use cardmatch_core::model::TechnologyId;

#[derive(Subcommand, Debug)]
pub enum TechCommands {
    /// Add a technology to the catalog
    Add {
        /// Unique technology name
        name: String,

        /// Free-form category (language, framework, database, ...)
        #[arg(long, default_value = "general")]
        kind: String,
    },

    /// List the catalog
    List,

    /// Remove a technology no project or card refers to
    Remove {
        id: TechnologyId,
    },
}
