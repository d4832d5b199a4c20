//! Routing from parsed subcommands to their handlers

use crate::cli::{
    CardCommands, Commands, MatchCommands, ProjectCommands, TechCommands,
};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{card, init, matching, project, tech};
use cardmatch_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => init::execute(ctx),
            Commands::Tech(sub) => execute_tech(ctx, &sub.command),
            Commands::Project(sub) => execute_project(ctx, &sub.command),
            Commands::Card(sub) => execute_card(ctx, &sub.command),
            Commands::Match(sub) => execute_match(ctx, &sub.command),
        }
    }
}

fn execute_tech(ctx: &CommandContext, cmd: &TechCommands) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    match cmd {
        TechCommands::Add { name, kind } => tech::add(ctx.cli, &store, name, kind),
        TechCommands::List => tech::list(ctx.cli, &store),
        TechCommands::Remove { id } => tech::remove(ctx.cli, &store, *id),
    }
}

fn execute_project(ctx: &CommandContext, cmd: &ProjectCommands) -> Result<()> {
    let owner = ctx.owner()?;
    let store = ctx.discover_or_open_store()?;
    match cmd {
        ProjectCommands::Create(args) => project::create(ctx.cli, &store, owner, args),
        ProjectCommands::List { name, status, tech } => project::list(
            ctx.cli,
            &store,
            owner,
            project::ListFilter {
                name: name.clone(),
                status: *status,
                tech: *tech,
            },
        ),
        ProjectCommands::Show { id } => project::show(ctx.cli, &store, owner, *id),
        ProjectCommands::Update(args) => project::update(ctx.cli, &store, owner, args),
        ProjectCommands::Status { id, status } => {
            project::set_status(ctx.cli, &store, owner, *id, *status)
        }
        ProjectCommands::Delete { id } => project::delete(ctx.cli, &store, owner, *id),
    }
}

fn execute_card(ctx: &CommandContext, cmd: &CardCommands) -> Result<()> {
    let owner = ctx.owner()?;
    let store = ctx.discover_or_open_store()?;
    match cmd {
        CardCommands::Create(args) => card::create(ctx.cli, &store, owner, args),
        CardCommands::List { available } => card::list(ctx.cli, &store, owner, *available),
        CardCommands::Show { id } => card::show(ctx.cli, &store, owner, *id),
        CardCommands::Update(args) => card::update(ctx.cli, &store, owner, args),
        CardCommands::Delete { id } => card::delete(ctx.cli, &store, owner, *id),
    }
}

fn execute_match(ctx: &CommandContext, cmd: &MatchCommands) -> Result<()> {
    let owner = ctx.owner()?;
    let store = ctx.discover_or_open_store()?;
    match cmd {
        MatchCommands::Preview { project, cards } => {
            matching::preview(ctx.cli, &store, owner, *project, cards)
        }
        MatchCommands::Create { project, cards } => {
            matching::create(ctx.cli, &store, owner, *project, cards)
        }
        MatchCommands::Dissolve { assignment } => {
            matching::dissolve(ctx.cli, &store, owner, *assignment)
        }
        MatchCommands::List => matching::list(ctx.cli, &store, owner),
        MatchCommands::Show { id } => matching::show(ctx.cli, &store, owner, *id),
        MatchCommands::Find {
            project,
            max_team_size,
            attempts,
            threshold,
            seed,
        } => matching::find(
            ctx.cli,
            &store,
            owner,
            *project,
            matching::FindOptions {
                max_team_size: *max_team_size,
                attempts: *attempts,
                threshold: *threshold,
                seed: seed.clone(),
            },
        ),
    }
}
