//! `cardmatch match` - preview, create, search and dissolve assignments

use cardmatch_core::error::Result;
use cardmatch_core::model::{AssignmentId, CardId, ProjectId};
use cardmatch_core::search::TeamSearchParams;
use cardmatch_core::store::Store;

use super::card::print_summary;
use super::output::{format_levels, format_percentage, print_json};
use crate::cli::{Cli, OutputFormat};

/// Search knobs as given on the command line
pub struct FindOptions {
    pub max_team_size: Option<usize>,
    pub attempts: Option<usize>,
    pub threshold: Option<f64>,
    pub seed: Option<String>,
}

pub fn preview(
    cli: &Cli,
    store: &Store,
    owner: &str,
    project_id: ProjectId,
    card_ids: &[CardId],
) -> Result<()> {
    let percentage = store.assignments().preview(owner, project_id, card_ids)?;
    let threshold = store.config().matching.threshold;

    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "project_id": project_id,
            "card_ids": card_ids,
            "percentage": percentage,
            "threshold": threshold,
            "qualifies": percentage > threshold,
        })),
        OutputFormat::Human => {
            println!("{}", format_percentage(percentage));
            if !cli.quiet {
                let verdict = if percentage > threshold {
                    "above"
                } else {
                    "not above"
                };
                println!(
                    "Team is {} the {} acceptance threshold",
                    verdict,
                    format_percentage(threshold)
                );
            }
            Ok(())
        }
    }
}

pub fn create(
    cli: &Cli,
    store: &Store,
    owner: &str,
    project_id: ProjectId,
    card_ids: &[CardId],
) -> Result<()> {
    let created = store.assignments().create(owner, project_id, card_ids)?;

    match cli.format {
        OutputFormat::Json => print_json(&created),
        OutputFormat::Human => {
            println!("{}", created.assignment_id);
            if !cli.quiet {
                println!(
                    "Assigned {} card(s) to project {} at {}",
                    created.card_ids.len(),
                    created.project_name,
                    format_percentage(created.percentage)
                );
            }
            Ok(())
        }
    }
}

pub fn dissolve(cli: &Cli, store: &Store, owner: &str, assignment_id: AssignmentId) -> Result<()> {
    let dissolved = store.assignments().dissolve(owner, assignment_id)?;

    match cli.format {
        OutputFormat::Json => print_json(&dissolved),
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Dissolved assignment {}; released project {} and {} card(s)",
                    dissolved.assignment_id, dissolved.project_id, dissolved.released_cards
                );
            }
            Ok(())
        }
    }
}

pub fn list(cli: &Cli, store: &Store, owner: &str) -> Result<()> {
    let assignments = store.assignments().list(owner)?;

    match cli.format {
        OutputFormat::Json => print_json(&assignments),
        OutputFormat::Human => {
            if assignments.is_empty() && !cli.quiet {
                println!("No assignments");
            }
            for a in &assignments {
                println!(
                    "{:>4}  project {} ({})  {}  {} card(s)  {}",
                    a.id,
                    a.project_id,
                    a.project_name,
                    format_percentage(a.percentage),
                    a.card_count,
                    a.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(())
        }
    }
}

pub fn show(cli: &Cli, store: &Store, owner: &str, assignment_id: AssignmentId) -> Result<()> {
    let detail = store.assignments().show(owner, assignment_id)?;

    match cli.format {
        OutputFormat::Json => print_json(&detail),
        OutputFormat::Human => {
            let a = &detail.assignment;
            println!("Assignment {}", a.id);
            println!("  compatibility: {}", format_percentage(a.percentage));
            println!("  created:       {}", a.created_at.to_rfc3339());
            println!(
                "  project:       {} {} ({})",
                detail.project.id, detail.project.name, detail.project.status
            );
            println!(
                "  requirements:  {}",
                format_levels(&detail.project.levels)
            );
            println!("  cards:");
            detail.cards.iter().for_each(print_summary);
            Ok(())
        }
    }
}

pub fn find(
    cli: &Cli,
    store: &Store,
    owner: &str,
    project_id: ProjectId,
    options: FindOptions,
) -> Result<()> {
    let params = TeamSearchParams {
        max_team_size: options.max_team_size,
        attempts: options.attempts,
        threshold: options.threshold,
        seed: options.seed,
    };
    let result = store.find_team(owner, project_id, &params)?;

    match cli.format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Human => {
            println!("{}", format_percentage(result.best_percentage));
            if !cli.quiet {
                println!(
                    "Best of {} attempt(s) over {} available card(s); threshold {}",
                    result.attempts_used,
                    result.pool_size,
                    if result.threshold_reached {
                        "reached"
                    } else {
                        "not reached"
                    }
                );
            }
            result.best_cards.iter().for_each(print_summary);
            Ok(())
        }
    }
}
