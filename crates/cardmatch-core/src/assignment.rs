//! Assignment lifecycle: preview, create and dissolve matches between a
//! project and a team of cards.
//!
//! Per project the state machine is UNASSIGNED → ASSIGNED → UNASSIGNED.
//! Every check and write of a transition runs inside one `BEGIN IMMEDIATE`
//! transaction; any error drops the transaction uncommitted, so no partial
//! assignment is ever visible.

use chrono::Utc;
use rusqlite::Transaction;
use serde::Serialize;

use crate::config::MatchingConfig;
use crate::db::{self, assignments, cards, projects, Database};
use crate::error::{MatchError, Result};
use crate::mapper;
use crate::model::{Assignment, AssignmentId, Card, CardId, Project, ProjectId};
use crate::scoring::round2;

pub use crate::db::assignments::AssignmentSummary;

/// Outcome of a committed assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedAssignment {
    pub assignment_id: AssignmentId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub percentage: f64,
    pub card_ids: Vec<CardId>,
}

/// Outcome of a dissolved assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DissolvedAssignment {
    pub assignment_id: AssignmentId,
    pub project_id: ProjectId,
    pub released_cards: usize,
}

/// An assignment with its project and cards resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentDetail {
    pub assignment: Assignment,
    pub project: Project,
    pub cards: Vec<Card>,
}

/// Deduplicate `card_ids` (first occurrence wins) and enforce the count bounds
pub fn normalize_card_ids(card_ids: &[CardId], min: usize, max: usize) -> Result<Vec<CardId>> {
    let mut unique = Vec::with_capacity(card_ids.len());
    for id in card_ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }

    if unique.len() < min || unique.len() > max {
        return Err(MatchError::CardCount {
            count: unique.len(),
            min,
            max,
        });
    }
    Ok(unique)
}

/// Load an owned project that declares at least one requirement
pub(crate) fn load_scorable_project(
    tx: &Transaction<'_>,
    owner_id: &str,
    project_id: ProjectId,
) -> Result<Project> {
    let project = projects::find_owned(tx, owner_id, project_id)?
        .ok_or_else(|| MatchError::not_found("project", project_id))?;

    if project.levels.is_empty() {
        return Err(MatchError::NoRequirements { project_id });
    }
    Ok(project)
}

fn load_owned_cards(tx: &Transaction<'_>, owner_id: &str, card_ids: &[CardId]) -> Result<Vec<Card>> {
    card_ids
        .iter()
        .map(|&id| {
            cards::find_owned(tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("card", id))
        })
        .collect()
}

/// Enforces the assignment invariants against one database connection
pub struct AssignmentManager<'a> {
    db: &'a Database,
    config: &'a MatchingConfig,
}

/// Point `card` at `assignment_id`; a card already taken reports its current holder
fn assign_card(tx: &Transaction<'_>, card: &Card, assignment_id: AssignmentId) -> Result<()> {
    if cards::assign(tx, card.id, assignment_id)? {
        return Ok(());
    }
    match cards::holder(tx, card.id)? {
        Some(holder) => Err(MatchError::CardAlreadyAssigned {
            card_id: card.id,
            card_name: card.name.clone(),
            assignment_id: holder,
        }),
        None => Err(MatchError::not_found("card", card.id)),
    }
}

impl<'a> AssignmentManager<'a> {
    pub fn new(db: &'a Database, config: &'a MatchingConfig) -> Self {
        Self { db, config }
    }

    /// Score a prospective team without committing anything.
    ///
    /// Same ownership, existence and count checks as [`Self::create`], but
    /// the cards may already be assigned and there is no threshold gate.
    #[tracing::instrument(skip(self, card_ids), fields(cards = card_ids.len()))]
    pub fn preview(&self, owner_id: &str, project_id: ProjectId, card_ids: &[CardId]) -> Result<f64> {
        let card_ids = normalize_card_ids(card_ids, self.config.min_cards, self.config.max_cards)?;

        let tx = self.db.read_tx()?;
        let project = load_scorable_project(&tx, owner_id, project_id)?;
        let team = load_owned_cards(&tx, owner_id, &card_ids)?;
        drop(tx);

        let percentage = round2(mapper::compatibility(
            &project,
            &team,
            &self.config.scoring_options(),
        ));
        tracing::debug!(project_id, percentage, "previewed compatibility");
        Ok(percentage)
    }

    /// Commit an assignment if the team strictly clears the threshold
    #[tracing::instrument(skip(self, card_ids), fields(cards = card_ids.len()))]
    pub fn create(
        &self,
        owner_id: &str,
        project_id: ProjectId,
        card_ids: &[CardId],
    ) -> Result<CreatedAssignment> {
        let card_ids = normalize_card_ids(card_ids, self.config.min_cards, self.config.max_cards)?;

        let tx = self.db.write_tx()?;

        let project = projects::find_owned(&tx, owner_id, project_id)?
            .ok_or_else(|| MatchError::not_found("project", project_id))?;
        if let Some(assignment_id) = project.assignment_id {
            return Err(MatchError::ProjectAlreadyAssigned {
                project_id,
                assignment_id,
            });
        }

        let team = load_owned_cards(&tx, owner_id, &card_ids)?;
        if let Some(taken) = team.iter().find(|c| c.assignment_id.is_some()) {
            return Err(MatchError::CardAlreadyAssigned {
                card_id: taken.id,
                card_name: taken.name.clone(),
                assignment_id: taken.assignment_id.unwrap_or_default(),
            });
        }

        if project.levels.is_empty() {
            return Err(MatchError::NoRequirements { project_id });
        }

        let percentage = round2(mapper::compatibility(
            &project,
            &team,
            &self.config.scoring_options(),
        ));
        if percentage <= self.config.threshold {
            tracing::info!(
                project_id,
                percentage,
                threshold = self.config.threshold,
                "compatibility below threshold"
            );
            return Err(MatchError::InsufficientCompatibility {
                percentage,
                threshold: self.config.threshold,
            });
        }

        let assignment_id = assignments::insert(&tx, project_id, percentage, Utc::now())?;
        for card in &team {
            assign_card(&tx, card, assignment_id)?;
        }

        db::commit(tx, "assignment")?;

        tracing::info!(assignment_id, project_id, percentage, "assignment created");
        Ok(CreatedAssignment {
            assignment_id,
            project_id,
            project_name: project.name,
            percentage,
            card_ids,
        })
    }

    /// Release the cards of an owned assignment, then delete it
    #[tracing::instrument(skip(self))]
    pub fn dissolve(&self, owner_id: &str, assignment_id: AssignmentId) -> Result<DissolvedAssignment> {
        let tx = self.db.write_tx()?;

        let assignment = assignments::find_owned(&tx, owner_id, assignment_id)?
            .ok_or_else(|| MatchError::not_found("assignment", assignment_id))?;

        let released_cards = cards::release_assignment(&tx, assignment_id)?;
        if !assignments::delete(&tx, assignment_id)? {
            return Err(MatchError::not_found("assignment", assignment_id));
        }

        db::commit(tx, "assignment removal")?;

        tracing::info!(assignment_id, released_cards, "assignment dissolved");
        Ok(DissolvedAssignment {
            assignment_id,
            project_id: assignment.project_id,
            released_cards,
        })
    }

    /// The owner's assignments, newest first
    pub fn list(&self, owner_id: &str) -> Result<Vec<AssignmentSummary>> {
        let tx = self.db.read_tx()?;
        assignments::list_owned(&tx, owner_id)
    }

    pub fn show(&self, owner_id: &str, assignment_id: AssignmentId) -> Result<AssignmentDetail> {
        let tx = self.db.read_tx()?;

        let assignment = assignments::find_owned(&tx, owner_id, assignment_id)?
            .ok_or_else(|| MatchError::not_found("assignment", assignment_id))?;
        let project = projects::find_owned(&tx, owner_id, assignment.project_id)?
            .ok_or_else(|| MatchError::not_found("assignment", assignment_id))?;
        let cards = cards::list_by_assignment(&tx, assignment_id)?;

        Ok(AssignmentDetail {
            assignment,
            project,
            cards,
        })
    }
}

#[cfg(test)]
mod tests;
