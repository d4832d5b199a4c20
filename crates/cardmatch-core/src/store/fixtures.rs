//! Shared setup for store-backed unit tests

use tempfile::TempDir;

use super::{Store, DEFAULT_STORE_DIR};
use crate::model::{Card, NewCard, NewProject, Project, SkillLevel, TechnologyId};

pub const OWNER: &str = "alice";
pub const OTHER_OWNER: &str = "bob";

/// A fresh store plus the directory keeping it alive
pub struct Fixture {
    pub dir: TempDir,
    pub store: Store,
    pub rust: TechnologyId,
    pub sql: TechnologyId,
}

pub fn level(tech_id: TechnologyId, level: u8) -> SkillLevel {
    SkillLevel { tech_id, level }
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(&dir.path().join(DEFAULT_STORE_DIR)).unwrap();
        let rust = store.add_technology("Rust", "language").unwrap().id;
        let sql = store.add_technology("SQL", "language").unwrap().id;
        Fixture {
            dir,
            store,
            rust,
            sql,
        }
    }

    /// Demands Rust 8, SQL 6 and level 5 on every axis
    pub fn project(&self, owner: &str, name: &str) -> Project {
        self.store
            .create_project(
                owner,
                &NewProject {
                    name: name.to_string(),
                    description: None,
                    collaboration: 5,
                    organization: 5,
                    delivery_speed: 5,
                    starts_on: None,
                    ends_on: None,
                    levels: vec![level(self.rust, 8), level(self.sql, 6)],
                },
            )
            .unwrap()
    }

    pub fn card(&self, owner: &str, name: &str, traits: u8, levels: Vec<SkillLevel>) -> Card {
        self.store
            .create_card(
                owner,
                &NewCard {
                    name: name.to_string(),
                    document_id: format!("doc-{name}"),
                    card_type: "developer".to_string(),
                    social: traits,
                    wisdom: traits,
                    speed: traits,
                    levels,
                },
            )
            .unwrap()
    }

    /// Covers the whole project on its own
    pub fn strong_card(&self, owner: &str, name: &str) -> Card {
        self.card(owner, name, 5, vec![level(self.rust, 8), level(self.sql, 6)])
    }

    /// Covers little of anything
    pub fn weak_card(&self, owner: &str, name: &str) -> Card {
        self.card(owner, name, 2, vec![level(self.rust, 2)])
    }
}
