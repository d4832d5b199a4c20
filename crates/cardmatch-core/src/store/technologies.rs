use super::Store;
use crate::bail_invalid;
use crate::db::{self, technologies};
use crate::error::{MatchError, Result};
use crate::model::{Technology, TechnologyId};

impl Store {
    /// Add a catalog entry; names are unique
    pub fn add_technology(&self, name: &str, kind: &str) -> Result<Technology> {
        let name = name.trim();
        if name.is_empty() {
            bail_invalid!("technology name", "(empty)");
        }

        let tx = self.db.write_tx()?;
        let technology = technologies::insert(&tx, name, kind.trim())?;
        db::commit(tx, "technology creation")?;

        tracing::info!(tech_id = technology.id, name, "technology added");
        Ok(technology)
    }

    pub fn get_technology(&self, id: TechnologyId) -> Result<Technology> {
        let tx = self.db.read_tx()?;
        technologies::find(&tx, id)?.ok_or_else(|| MatchError::not_found("technology", id))
    }

    pub fn list_technologies(&self) -> Result<Vec<Technology>> {
        let tx = self.db.read_tx()?;
        technologies::list(&tx)
    }

    /// Remove a technology no project or card refers to
    pub fn remove_technology(&self, id: TechnologyId) -> Result<()> {
        let tx = self.db.write_tx()?;
        technologies::delete(&tx, id)?;
        db::commit(tx, "technology removal")?;

        tracing::info!(tech_id = id, "technology removed");
        Ok(())
    }
}
