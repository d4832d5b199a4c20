//! `cardmatch project` - project management

use cardmatch_core::error::Result;
use cardmatch_core::model::{
    NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate, TechnologyId,
};
use cardmatch_core::store::{ProjectFilter, Store};

use super::output::{format_levels, print_json};
use crate::cli::project::{ProjectCreateArgs, ProjectUpdateArgs};
use crate::cli::{Cli, OutputFormat};

/// Listing filters as given on the command line
pub struct ListFilter {
    pub name: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tech: Option<TechnologyId>,
}

fn print_summary(project: &Project) {
    let lock = match project.assignment_id {
        Some(a) => format!("  [assignment {}]", a),
        None => String::new(),
    };
    println!(
        "{:>4}  {}  ({}){}",
        project.id, project.name, project.status, lock
    );
}

fn print_detail(project: &Project) {
    println!("Project {}: {}", project.id, project.name);
    if let Some(description) = &project.description {
        println!("  description:    {}", description);
    }
    println!("  status:         {}", project.status);
    println!("  collaboration:  {}", project.collaboration);
    println!("  organization:   {}", project.organization);
    println!("  delivery speed: {}", project.delivery_speed);
    if let Some(starts_on) = project.starts_on {
        println!("  starts on:      {}", starts_on);
    }
    if let Some(ends_on) = project.ends_on {
        println!("  ends on:        {}", ends_on);
    }
    println!("  requirements:   {}", format_levels(&project.levels));
    match project.assignment_id {
        Some(a) => println!("  assignment:     {} (locked)", a),
        None => println!("  assignment:     -"),
    }
}

fn print_project(cli: &Cli, project: &Project) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(project),
        OutputFormat::Human => {
            print_detail(project);
            Ok(())
        }
    }
}

pub fn create(cli: &Cli, store: &Store, owner: &str, args: &ProjectCreateArgs) -> Result<()> {
    let project = store.create_project(
        owner,
        &NewProject {
            name: args.name.clone(),
            description: args.description.clone(),
            collaboration: args.collaboration,
            organization: args.organization,
            delivery_speed: args.delivery_speed,
            starts_on: args.starts_on,
            ends_on: args.ends_on,
            levels: args.level.clone(),
        },
    )?;

    match cli.format {
        OutputFormat::Json => print_json(&project),
        OutputFormat::Human => {
            println!("{}", project.id);
            if !cli.quiet {
                println!("Created project {}", project.name);
            }
            Ok(())
        }
    }
}

pub fn list(cli: &Cli, store: &Store, owner: &str, filter: ListFilter) -> Result<()> {
    let projects = store.list_projects(
        owner,
        &ProjectFilter {
            name_contains: filter.name,
            status: filter.status,
            tech_id: filter.tech,
        },
    )?;

    match cli.format {
        OutputFormat::Json => print_json(&projects),
        OutputFormat::Human => {
            if projects.is_empty() && !cli.quiet {
                println!("No projects");
            }
            projects.iter().for_each(print_summary);
            Ok(())
        }
    }
}

pub fn show(cli: &Cli, store: &Store, owner: &str, id: ProjectId) -> Result<()> {
    let project = store.get_project(owner, id)?;
    print_project(cli, &project)
}

pub fn update(cli: &Cli, store: &Store, owner: &str, args: &ProjectUpdateArgs) -> Result<()> {
    let update = ProjectUpdate {
        name: args.name.clone(),
        description: args.description.clone(),
        status: args.status,
        collaboration: args.collaboration,
        organization: args.organization,
        delivery_speed: args.delivery_speed,
        starts_on: args.starts_on,
        ends_on: args.ends_on,
        levels: (!args.level.is_empty()).then(|| args.level.clone()),
    };
    let project = store.update_project(owner, args.id, &update)?;
    print_project(cli, &project)
}

pub fn set_status(
    cli: &Cli,
    store: &Store,
    owner: &str,
    id: ProjectId,
    status: ProjectStatus,
) -> Result<()> {
    let project = store.set_project_status(owner, id, status)?;
    match cli.format {
        OutputFormat::Json => print_json(&project),
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Project {} is now {}", project.id, project.status);
            }
            Ok(())
        }
    }
}

pub fn delete(cli: &Cli, store: &Store, owner: &str, id: ProjectId) -> Result<()> {
    store.delete_project(owner, id)?;
    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": id })),
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Deleted project {}", id);
            }
            Ok(())
        }
    }
}
