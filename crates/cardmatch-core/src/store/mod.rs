//! Store management for cardmatch
//!
//! The store is the directory holding `config.toml` and the SQLite database.
//! Default location: `.cardmatch/` under the working directory.

mod cards;
#[cfg(test)]
pub(crate) mod fixtures;
mod projects;
mod technologies;

use std::fs;
use std::path::{Path, PathBuf};

use crate::assignment::AssignmentManager;
use crate::config::MatchConfig;
use crate::db::{Database, DB_FILE};
use crate::error::{MatchError, Result};
use crate::model::ProjectId;
use crate::search::{self, TeamSearchParams, TeamSearchResult};

pub use crate::db::projects::ProjectFilter;

/// Default store directory name
pub const DEFAULT_STORE_DIR: &str = ".cardmatch";

/// Configuration file name inside a store
pub const CONFIG_FILE: &str = "config.toml";

/// Walk up from `start` looking for a `.cardmatch` directory
pub fn discover_store(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DEFAULT_STORE_DIR))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| MatchError::StoreNotFound {
            search_root: start.to_path_buf(),
        })
}

/// The cardmatch store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    config: MatchConfig,
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given directory
    pub fn discover(start: &Path) -> Result<Self> {
        let store_path = discover_store(start)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(MatchError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }
        if !path.join(DB_FILE).is_file() {
            return Err(MatchError::InvalidStore {
                reason: format!("{} has no {}", path.display(), DB_FILE),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            MatchConfig::load(&config_path)?
        } else {
            MatchConfig::default()
        };

        let db = Database::open(path, &config.database)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Initialize a store at `store_root`.
    ///
    /// Idempotent: an existing `config.toml` is kept and the schema is only
    /// created when missing.
    #[tracing::instrument(skip(store_root), fields(store_root = %store_root.display()))]
    pub fn init(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            MatchConfig::load(&config_path)?
        } else {
            let config = MatchConfig::default();
            config.save(&config_path)?;
            config
        };

        let db = Database::open(store_root, &config.database)?;
        tracing::info!("store initialized");

        Ok(Store {
            root: store_root.to_path_buf(),
            config,
            db,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Assignment operations bound to this store's database and matching rules
    pub fn assignments(&self) -> AssignmentManager<'_> {
        AssignmentManager::new(&self.db, &self.config.matching)
    }

    /// Randomized search over the owner's available cards
    pub fn find_team(
        &self,
        owner_id: &str,
        project_id: ProjectId,
        params: &TeamSearchParams,
    ) -> Result<TeamSearchResult> {
        search::find_team(&self.db, &self.config, owner_id, project_id, params)
    }
}
