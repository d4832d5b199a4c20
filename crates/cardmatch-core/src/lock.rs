//! Edit/delete locks on matched projects and cards
//!
//! An entity referenced by an assignment is locked. Locked projects only
//! accept a status change; locked cards accept nothing. Callers evaluate these
//! against state read inside the mutating transaction.

use crate::error::{MatchError, Result};
use crate::model::{AssignmentId, Card, Project, ProjectUpdate};

/// Fields a locked project may still change
pub const PROJECT_UNLOCKED_FIELDS: &[&str] = &["status"];

/// Current lock on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    /// Held by the given assignment
    Locked(AssignmentId),
}

impl LockState {
    pub fn of_project(project: &Project) -> Self {
        project
            .assignment_id
            .map_or(LockState::Unlocked, LockState::Locked)
    }

    pub fn of_card(card: &Card) -> Self {
        card.assignment_id
            .map_or(LockState::Unlocked, LockState::Locked)
    }

    pub fn is_locked(self) -> bool {
        matches!(self, LockState::Locked(_))
    }
}

pub fn check_project_update(project: &Project, update: &ProjectUpdate) -> Result<()> {
    let LockState::Locked(assignment_id) = LockState::of_project(project) else {
        return Ok(());
    };

    let blocked: Vec<&str> = update
        .touched_fields()
        .into_iter()
        .filter(|f| !PROJECT_UNLOCKED_FIELDS.contains(f))
        .collect();

    if blocked.is_empty() {
        return Ok(());
    }

    Err(MatchError::locked(
        "project",
        project.id,
        assignment_id,
        format!("changing {}", blocked.join(", ")),
    ))
}

pub fn check_project_delete(project: &Project) -> Result<()> {
    match LockState::of_project(project) {
        LockState::Unlocked => Ok(()),
        LockState::Locked(assignment_id) => Err(MatchError::locked(
            "project",
            project.id,
            assignment_id,
            "deletion",
        )),
    }
}

pub fn check_card_update(card: &Card) -> Result<()> {
    match LockState::of_card(card) {
        LockState::Unlocked => Ok(()),
        LockState::Locked(assignment_id) => Err(MatchError::locked(
            "card",
            card.id,
            assignment_id,
            "modification",
        )),
    }
}

pub fn check_card_delete(card: &Card) -> Result<()> {
    match LockState::of_card(card) {
        LockState::Unlocked => Ok(()),
        LockState::Locked(assignment_id) => {
            Err(MatchError::locked("card", card.id, assignment_id, "deletion"))
        }
    }
}
