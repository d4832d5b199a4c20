//! Technology catalog queries

use rusqlite::{params, OptionalExtension, Row, Transaction};

use crate::error::{MatchError, Result};
use crate::map_db_err;
use crate::model::{SkillLevel, Technology, TechnologyId};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Technology> {
    Ok(Technology {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
    })
}

pub fn insert(tx: &Transaction<'_>, name: &str, kind: &str) -> Result<Technology> {
    match tx.execute(
        "INSERT INTO technologies (name, kind) VALUES (?1, ?2)",
        params![name, kind],
    ) {
        Ok(_) => {}
        Err(e) if super::is_constraint_violation(&e) => {
            return Err(MatchError::already_exists("technology", name));
        }
        Err(e) => return Err(MatchError::storage("insert technology", e)),
    }

    Ok(Technology {
        id: tx.last_insert_rowid(),
        name: name.to_string(),
        kind: kind.to_string(),
    })
}

pub fn find(tx: &Transaction<'_>, id: TechnologyId) -> Result<Option<Technology>> {
    tx.query_row(
        "SELECT id, name, kind FROM technologies WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()
    .map_err(map_db_err!("read technology"))
}

pub fn list(tx: &Transaction<'_>) -> Result<Vec<Technology>> {
    let mut stmt = tx
        .prepare("SELECT id, name, kind FROM technologies ORDER BY name")
        .map_err(map_db_err!("prepare technology listing"))?;
    let rows = stmt
        .query_map([], from_row)
        .map_err(map_db_err!("list technologies"))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_db_err!("read technology row"))
}

/// Fail with NotFound on the first level whose technology is not in the catalog
pub fn ensure_known(tx: &Transaction<'_>, levels: &[SkillLevel]) -> Result<()> {
    for level in levels {
        if find(tx, level.tech_id)?.is_none() {
            return Err(MatchError::not_found("technology", level.tech_id));
        }
    }
    Ok(())
}

/// Delete a technology that no project or card references
pub fn delete(tx: &Transaction<'_>, id: TechnologyId) -> Result<()> {
    if find(tx, id)?.is_none() {
        return Err(MatchError::not_found("technology", id));
    }

    let references: i64 = tx
        .query_row(
            "SELECT (SELECT COUNT(*) FROM project_levels WHERE tech_id = ?1)
                  + (SELECT COUNT(*) FROM card_levels WHERE tech_id = ?1)",
            params![id],
            |r| r.get(0),
        )
        .map_err(map_db_err!("count technology references"))?;

    if references > 0 {
        return Err(MatchError::InUse {
            entity: "technology".to_string(),
            id,
            referenced_by: format!("{} project/card level(s)", references),
        });
    }

    tx.execute("DELETE FROM technologies WHERE id = ?1", params![id])
        .map_err(map_db_err!("delete technology"))?;
    Ok(())
}
