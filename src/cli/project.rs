//! Project subcommands

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::parse::{parse_date, parse_level, parse_skill_level, parse_status};
use cardmatch_core::model::{ProjectId, ProjectStatus, SkillLevel, TechnologyId};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project
    Create(ProjectCreateArgs),

    /// List your projects
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        name: Option<String>,

        /// Only projects in this status
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,

        /// Only projects requiring this technology
        #[arg(long)]
        tech: Option<TechnologyId>,
    },

    /// Show a project with its requirements
    Show { id: ProjectId },

    /// Update project fields (only `status` while matched)
    Update(ProjectUpdateArgs),

    /// Change a project's status; allowed while matched
    Status {
        id: ProjectId,

        /// waiting, in-progress or finished
        #[arg(value_parser = parse_status)]
        status: ProjectStatus,
    },

    /// Delete an unmatched project
    Delete { id: ProjectId },
}

/// Arguments for `project create`
#[derive(Args, Debug)]
pub struct ProjectCreateArgs {
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Collaboration demand (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub collaboration: u8,

    /// Organization demand (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub organization: u8,

    /// Delivery speed demand (1-10)
    #[arg(long, default_value = "5", value_parser = parse_level)]
    pub delivery_speed: u8,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub starts_on: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub ends_on: Option<NaiveDate>,

    /// Required technology level, `<tech-id>=<level>` (repeatable)
    #[arg(long, value_parser = parse_skill_level, action = clap::ArgAction::Append)]
    pub level: Vec<SkillLevel>,
}

/// Arguments for `project update`
#[derive(Args, Debug)]
pub struct ProjectUpdateArgs {
    pub id: ProjectId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<ProjectStatus>,

    #[arg(long, value_parser = parse_level)]
    pub collaboration: Option<u8>,

    #[arg(long, value_parser = parse_level)]
    pub organization: Option<u8>,

    #[arg(long, value_parser = parse_level)]
    pub delivery_speed: Option<u8>,

    #[arg(long, value_parser = parse_date)]
    pub starts_on: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date)]
    pub ends_on: Option<NaiveDate>,

    /// Replace every requirement, `<tech-id>=<level>` (repeatable)
    #[arg(long, value_parser = parse_skill_level, action = clap::ArgAction::Append)]
    pub level: Vec<SkillLevel>,
}
