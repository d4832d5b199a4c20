//! Assignment queries; ownership is resolved through the referenced project

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Transaction};
use serde::Serialize;

use crate::error::{MatchError, Result};
use crate::map_db_err;
use crate::model::{Assignment, AssignmentId, CardId, ProjectId};

/// One row of an owner's assignment listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentSummary {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
    pub card_count: usize,
}

pub fn find_by_project(tx: &Transaction<'_>, project_id: ProjectId) -> Result<Option<AssignmentId>> {
    tx.query_row(
        "SELECT id FROM assignments WHERE project_id = ?1",
        params![project_id],
        |r| r.get(0),
    )
    .optional()
    .map_err(map_db_err!("look up project assignment"))
}

/// Insert the assignment row for `project_id`.
///
/// The UNIQUE constraint on `project_id` backs the in-transaction check;
/// a violation is reported as the project already being assigned.
pub fn insert(
    tx: &Transaction<'_>,
    project_id: ProjectId,
    percentage: f64,
    created_at: DateTime<Utc>,
) -> Result<AssignmentId> {
    match tx.execute(
        "INSERT INTO assignments (project_id, percentage, created_at) VALUES (?1, ?2, ?3)",
        params![project_id, percentage, created_at],
    ) {
        Ok(_) => Ok(tx.last_insert_rowid()),
        Err(e) if super::is_constraint_violation(&e) => {
            let assignment_id = find_by_project(tx, project_id)?.unwrap_or_default();
            Err(MatchError::ProjectAlreadyAssigned {
                project_id,
                assignment_id,
            })
        }
        Err(e) => Err(MatchError::storage("insert assignment", e)),
    }
}

fn card_ids(tx: &Transaction<'_>, assignment_id: AssignmentId) -> Result<Vec<CardId>> {
    let mut stmt = tx
        .prepare("SELECT id FROM cards WHERE assignment_id = ?1 ORDER BY id")
        .map_err(map_db_err!("prepare assignment cards query"))?;
    let rows = stmt
        .query_map(params![assignment_id], |r| r.get(0))
        .map_err(map_db_err!("read assignment cards"))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_db_err!("read assignment card row"))
}

/// Load an assignment whose project belongs to `owner_id`
pub fn find_owned(
    tx: &Transaction<'_>,
    owner_id: &str,
    id: AssignmentId,
) -> Result<Option<Assignment>> {
    let row = tx
        .query_row(
            "SELECT a.id, a.project_id, a.percentage, a.created_at
             FROM assignments a
             JOIN projects p ON p.id = a.project_id
             WHERE a.id = ?1 AND p.owner_id = ?2",
            params![id, owner_id],
            |r| {
                Ok(Assignment {
                    id: r.get(0)?,
                    project_id: r.get(1)?,
                    percentage: r.get(2)?,
                    created_at: r.get(3)?,
                    card_ids: Vec::new(),
                })
            },
        )
        .optional()
        .map_err(map_db_err!("read assignment"))?;

    match row {
        Some(mut a) => {
            a.card_ids = card_ids(tx, a.id)?;
            Ok(Some(a))
        }
        None => Ok(None),
    }
}

/// An owner's assignments, newest first
pub fn list_owned(tx: &Transaction<'_>, owner_id: &str) -> Result<Vec<AssignmentSummary>> {
    let mut stmt = tx
        .prepare(
            "SELECT a.id, a.project_id, p.name, a.percentage, a.created_at,
                    (SELECT COUNT(*) FROM cards c WHERE c.assignment_id = a.id)
             FROM assignments a
             JOIN projects p ON p.id = a.project_id
             WHERE p.owner_id = ?1
             ORDER BY a.id DESC",
        )
        .map_err(map_db_err!("prepare assignment listing"))?;
    let rows = stmt
        .query_map(params![owner_id], |r| {
            let card_count: i64 = r.get(5)?;
            Ok(AssignmentSummary {
                id: r.get(0)?,
                project_id: r.get(1)?,
                project_name: r.get(2)?,
                percentage: r.get(3)?,
                created_at: r.get(4)?,
                card_count: usize::try_from(card_count).unwrap_or(0),
            })
        })
        .map_err(map_db_err!("list assignments"))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_db_err!("read assignment row"))
}

pub fn delete(tx: &Transaction<'_>, id: AssignmentId) -> Result<bool> {
    let affected = tx
        .execute("DELETE FROM assignments WHERE id = ?1", params![id])
        .map_err(map_db_err!("delete assignment"))?;
    Ok(affected > 0)
}
