//! Project queries, always scoped by owner

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use crate::error::Result;
use crate::map_db_err;
use crate::model::{NewProject, Project, ProjectId, ProjectStatus, SkillLevel, TechnologyId};

const SELECT_PROJECT: &str = "SELECT p.id, p.owner_id, p.name, p.description, p.status,
        p.collaboration, p.organization, p.delivery_speed, p.starts_on, p.ends_on,
        p.created_at, a.id
     FROM projects p
     LEFT JOIN assignments a ON a.project_id = p.id";

/// Listing filters; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Only projects requiring this technology
    pub tech_id: Option<TechnologyId>,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let status_code: String = row.get(4)?;
    let status = ProjectStatus::from_code(&status_code)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Project {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        status,
        collaboration: row.get(5)?,
        organization: row.get(6)?,
        delivery_speed: row.get(7)?,
        starts_on: row.get(8)?,
        ends_on: row.get(9)?,
        created_at: row.get(10)?,
        levels: Vec::new(),
        assignment_id: row.get(11)?,
    })
}

fn load_levels(tx: &Transaction<'_>, project_id: ProjectId) -> Result<Vec<SkillLevel>> {
    let mut stmt = tx
        .prepare(
            "SELECT tech_id, required_level FROM project_levels
             WHERE project_id = ?1 ORDER BY tech_id",
        )
        .map_err(map_db_err!("prepare project levels query"))?;
    let rows = stmt
        .query_map(params![project_id], |r| {
            Ok(SkillLevel {
                tech_id: r.get(0)?,
                level: r.get(1)?,
            })
        })
        .map_err(map_db_err!("read project levels"))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_db_err!("read project level row"))
}

fn write_levels(tx: &Transaction<'_>, project_id: ProjectId, levels: &[SkillLevel]) -> Result<()> {
    tx.execute(
        "DELETE FROM project_levels WHERE project_id = ?1",
        params![project_id],
    )
    .map_err(map_db_err!("clear project levels"))?;

    for level in levels {
        tx.execute(
            "INSERT INTO project_levels (project_id, tech_id, required_level) VALUES (?1, ?2, ?3)",
            params![project_id, level.tech_id, level.level],
        )
        .map_err(map_db_err!("insert project level"))?;
    }
    Ok(())
}

pub fn insert(
    tx: &Transaction<'_>,
    owner_id: &str,
    project: &NewProject,
    created_at: DateTime<Utc>,
) -> Result<ProjectId> {
    tx.execute(
        "INSERT INTO projects (owner_id, name, description, status, collaboration,
            organization, delivery_speed, starts_on, ends_on, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            owner_id,
            project.name,
            project.description,
            ProjectStatus::default().code(),
            project.collaboration,
            project.organization,
            project.delivery_speed,
            project.starts_on,
            project.ends_on,
            created_at,
        ],
    )
    .map_err(map_db_err!("insert project"))?;

    let id = tx.last_insert_rowid();
    write_levels(tx, id, &project.levels)?;
    Ok(id)
}

/// Load a project with its levels if it exists and belongs to `owner_id`
pub fn find_owned(
    tx: &Transaction<'_>,
    owner_id: &str,
    id: ProjectId,
) -> Result<Option<Project>> {
    let project = tx
        .query_row(
            &format!("{} WHERE p.id = ?1 AND p.owner_id = ?2", SELECT_PROJECT),
            params![id, owner_id],
            from_row,
        )
        .optional()
        .map_err(map_db_err!("read project"))?;

    match project {
        Some(mut p) => {
            p.levels = load_levels(tx, p.id)?;
            Ok(Some(p))
        }
        None => Ok(None),
    }
}

pub fn list(tx: &Transaction<'_>, owner_id: &str, filter: &ProjectFilter) -> Result<Vec<Project>> {
    let sql = format!(
        "{} WHERE p.owner_id = ?1
           AND (?2 IS NULL OR p.name LIKE '%' || ?2 || '%')
           AND (?3 IS NULL OR p.status = ?3)
           AND (?4 IS NULL OR EXISTS (
                SELECT 1 FROM project_levels pl WHERE pl.project_id = p.id AND pl.tech_id = ?4))
         ORDER BY p.id",
        SELECT_PROJECT
    );

    let projects = {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(map_db_err!("prepare project listing"))?;
        let rows = stmt
            .query_map(
                params![
                    owner_id,
                    filter.name_contains,
                    filter.status.map(|s| s.code()),
                    filter.tech_id,
                ],
                from_row,
            )
            .map_err(map_db_err!("list projects"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_db_err!("read project row"))?
    };

    projects
        .into_iter()
        .map(|mut p| {
            p.levels = load_levels(tx, p.id)?;
            Ok(p)
        })
        .collect()
}

/// Persist every field of an already-validated project; levels are replaced
/// only when `replace_levels` is set
pub fn update(tx: &Transaction<'_>, project: &Project, replace_levels: bool) -> Result<()> {
    tx.execute(
        "UPDATE projects SET name = ?1, description = ?2, status = ?3, collaboration = ?4,
            organization = ?5, delivery_speed = ?6, starts_on = ?7, ends_on = ?8
         WHERE id = ?9 AND owner_id = ?10",
        params![
            project.name,
            project.description,
            project.status.code(),
            project.collaboration,
            project.organization,
            project.delivery_speed,
            project.starts_on,
            project.ends_on,
            project.id,
            project.owner_id,
        ],
    )
    .map_err(map_db_err!("update project"))?;

    if replace_levels {
        write_levels(tx, project.id, &project.levels)?;
    }
    Ok(())
}

/// Delete an owned project; returns whether a row was removed
pub fn delete(tx: &Transaction<'_>, owner_id: &str, id: ProjectId) -> Result<bool> {
    let affected = tx
        .execute(
            "DELETE FROM projects WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )
        .map_err(map_db_err!("delete project"))?;
    Ok(affected > 0)
}
