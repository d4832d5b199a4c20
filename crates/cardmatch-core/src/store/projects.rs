use chrono::Utc;

use super::Store;
use crate::db::projects::ProjectFilter;
use crate::db::{self, projects, technologies};
use crate::error::{MatchError, Result};
use crate::lock;
use crate::model::{NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate};

impl Store {
    #[tracing::instrument(skip(self, project), fields(name = %project.name))]
    pub fn create_project(&self, owner_id: &str, project: &NewProject) -> Result<Project> {
        project.validate()?;

        let tx = self.db.write_tx()?;
        technologies::ensure_known(&tx, &project.levels)?;
        let id = projects::insert(&tx, owner_id, project, Utc::now())?;
        let created = projects::find_owned(&tx, owner_id, id)?
            .ok_or_else(|| MatchError::not_found("project", id))?;
        db::commit(tx, "project creation")?;

        tracing::info!(project_id = id, "project created");
        Ok(created)
    }

    pub fn get_project(&self, owner_id: &str, id: ProjectId) -> Result<Project> {
        let tx = self.db.read_tx()?;
        projects::find_owned(&tx, owner_id, id)?.ok_or_else(|| MatchError::not_found("project", id))
    }

    pub fn list_projects(&self, owner_id: &str, filter: &ProjectFilter) -> Result<Vec<Project>> {
        let tx = self.db.read_tx()?;
        projects::list(&tx, owner_id, filter)
    }

    /// Apply a partial update, refusing anything but a status change while
    /// the project is matched
    #[tracing::instrument(skip(self, update), fields(fields = ?update.touched_fields()))]
    pub fn update_project(
        &self,
        owner_id: &str,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project> {
        if update.is_empty() {
            return Err(MatchError::EmptyUpdate {
                entity: "project".to_string(),
                id,
            });
        }

        let tx = self.db.write_tx()?;
        let current = projects::find_owned(&tx, owner_id, id)?
            .ok_or_else(|| MatchError::not_found("project", id))?;
        lock::check_project_update(&current, update)?;

        let updated = update.apply_to(&current)?;
        if let Some(levels) = &update.levels {
            technologies::ensure_known(&tx, levels)?;
        }
        projects::update(&tx, &updated, update.levels.is_some())?;
        db::commit(tx, "project update")?;

        tracing::info!(project_id = id, "project updated");
        Ok(updated)
    }

    /// Change only the status, which is allowed even while matched
    pub fn set_project_status(
        &self,
        owner_id: &str,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<Project> {
        let update = ProjectUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update_project(owner_id, id, &update)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_project(&self, owner_id: &str, id: ProjectId) -> Result<()> {
        let tx = self.db.write_tx()?;
        let current = projects::find_owned(&tx, owner_id, id)?
            .ok_or_else(|| MatchError::not_found("project", id))?;
        lock::check_project_delete(&current)?;

        if !projects::delete(&tx, owner_id, id)? {
            return Err(MatchError::not_found("project", id));
        }
        db::commit(tx, "project deletion")?;

        tracing::info!(project_id = id, "project deleted");
        Ok(())
    }
}
