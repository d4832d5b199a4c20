//! Assignment subcommands

use clap::Subcommand;

use cardmatch_core::model::{AssignmentId, CardId, ProjectId};

#[derive(Subcommand, Debug)]
pub enum MatchCommands {
    /// Score a team against a project without committing
    Preview {
        project: ProjectId,

        /// Card ids forming the team
        #[arg(required = true)]
        cards: Vec<CardId>,
    },

    /// Assign a team to a project if it clears the threshold
    Create {
        project: ProjectId,

        #[arg(required = true)]
        cards: Vec<CardId>,
    },

    /// Dissolve an assignment, releasing its project and cards
    Dissolve { assignment: AssignmentId },

    /// List your assignments, newest first
    List,

    /// Show an assignment with its project and cards
    Show { id: AssignmentId },

    /// Search your available cards for a qualifying team
    Find {
        project: ProjectId,

        /// Largest team to try (1-5)
        #[arg(long)]
        max_team_size: Option<usize>,

        /// Random teams to sample (1-1000)
        #[arg(long)]
        attempts: Option<usize>,

        /// Stop once a team reaches this percentage (0-100)
        #[arg(long)]
        threshold: Option<f64>,

        /// Seed for a reproducible search
        #[arg(long)]
        seed: Option<String>,
    },
}
