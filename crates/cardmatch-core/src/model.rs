//! Domain records: technologies, projects, cards and assignments

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{MatchError, Result};

pub type TechnologyId = i64;
pub type ProjectId = i64;
pub type CardId = i64;
pub type AssignmentId = i64;

/// Inclusive bounds for every level and trait
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

/// Reject a level outside `MIN_LEVEL..=MAX_LEVEL`
pub fn validate_level(context: &str, level: u8) -> Result<u8> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        bail_invalid!(context, format!("{} (expected {}-{})", level, MIN_LEVEL, MAX_LEVEL));
    }
    Ok(level)
}

/// A catalog entry that requirements and proficiencies refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub id: TechnologyId,
    pub name: String,
    pub kind: String,
}

/// A (technology, level) pair declared on a project or card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub tech_id: TechnologyId,
    pub level: u8,
}

impl SkillLevel {
    pub fn new(tech_id: TechnologyId, level: u8) -> Result<Self> {
        Ok(Self {
            tech_id,
            level: validate_level("technology level", level)?,
        })
    }
}

impl FromStr for SkillLevel {
    type Err = MatchError;

    /// Parse `<tech-id>=<level>`
    fn from_str(s: &str) -> Result<Self> {
        let (tech, level) = s
            .split_once('=')
            .ok_or_else(|| MatchError::invalid_value("skill level (expected <tech-id>=<level>)", s))?;
        let tech_id = tech
            .trim()
            .parse::<TechnologyId>()
            .map_err(|_| MatchError::invalid_value("technology id", tech))?;
        let level = level
            .trim()
            .parse::<u8>()
            .map_err(|_| MatchError::invalid_value("technology level", level))?;
        SkillLevel::new(tech_id, level)
    }
}

/// Project lifecycle status, the only field editable while a project is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Waiting,
    InProgress,
    Finished,
}

impl ProjectStatus {
    /// Single-letter code stored in the database
    pub fn code(self) -> &'static str {
        match self {
            ProjectStatus::Waiting => "E",
            ProjectStatus::InProgress => "P",
            ProjectStatus::Finished => "F",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "E" => Ok(ProjectStatus::Waiting),
            "P" => Ok(ProjectStatus::InProgress),
            "F" => Ok(ProjectStatus::Finished),
            other => Err(MatchError::invalid_value("project status code", other)),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Waiting => "waiting",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectStatus {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "waiting" | "e" => Ok(ProjectStatus::Waiting),
            "in-progress" | "p" => Ok(ProjectStatus::InProgress),
            "finished" | "f" => Ok(ProjectStatus::Finished),
            _ => Err(MatchError::invalid_value(
                "project status (expected waiting, in-progress or finished)",
                s,
            )),
        }
    }
}

/// A project with its demand levels and requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub collaboration: u8,
    pub organization: u8,
    pub delivery_speed: u8,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub levels: Vec<SkillLevel>,
    /// Assignment referencing this project, if matched
    pub assignment_id: Option<AssignmentId>,
}

/// Input for creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub collaboration: u8,
    pub organization: u8,
    pub delivery_speed: u8,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub levels: Vec<SkillLevel>,
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail_invalid!("project name", "(empty)");
        }
        validate_level("collaboration level", self.collaboration)?;
        validate_level("organization level", self.organization)?;
        validate_level("delivery speed level", self.delivery_speed)?;
        validate_dates(self.starts_on, self.ends_on)?;
        validate_levels(&self.levels)
    }
}

/// Partial update of a project; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub collaboration: Option<u8>,
    pub organization: Option<u8>,
    pub delivery_speed: Option<u8>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    /// Replaces the whole requirement set when present
    pub levels: Option<Vec<SkillLevel>>,
}

impl ProjectUpdate {
    /// Names of the fields this update touches
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.collaboration.is_some() {
            fields.push("collaboration");
        }
        if self.organization.is_some() {
            fields.push("organization");
        }
        if self.delivery_speed.is_some() {
            fields.push("delivery_speed");
        }
        if self.starts_on.is_some() {
            fields.push("starts_on");
        }
        if self.ends_on.is_some() {
            fields.push("ends_on");
        }
        if self.levels.is_some() {
            fields.push("levels");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Apply the update to a copy of `project` and validate the result
    pub fn apply_to(&self, project: &Project) -> Result<Project> {
        let mut updated = project.clone();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                bail_invalid!("project name", "(empty)");
            }
            updated.name = name.clone();
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        if let Some(v) = self.collaboration {
            updated.collaboration = validate_level("collaboration level", v)?;
        }
        if let Some(v) = self.organization {
            updated.organization = validate_level("organization level", v)?;
        }
        if let Some(v) = self.delivery_speed {
            updated.delivery_speed = validate_level("delivery speed level", v)?;
        }
        if self.starts_on.is_some() {
            updated.starts_on = self.starts_on;
        }
        if self.ends_on.is_some() {
            updated.ends_on = self.ends_on;
        }
        if let Some(levels) = &self.levels {
            validate_levels(levels)?;
            updated.levels = levels.clone();
        }
        validate_dates(updated.starts_on, updated.ends_on)?;
        Ok(updated)
    }
}

/// A candidate card with its traits and proficiencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub owner_id: String,
    pub name: String,
    pub document_id: String,
    pub card_type: String,
    pub social: u8,
    pub wisdom: u8,
    pub speed: u8,
    pub created_at: DateTime<Utc>,
    pub levels: Vec<SkillLevel>,
    pub assignment_id: Option<AssignmentId>,
}

/// Input for creating a card
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub name: String,
    pub document_id: String,
    pub card_type: String,
    pub social: u8,
    pub wisdom: u8,
    pub speed: u8,
    pub levels: Vec<SkillLevel>,
}

impl NewCard {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail_invalid!("card name", "(empty)");
        }
        validate_level("social level", self.social)?;
        validate_level("wisdom level", self.wisdom)?;
        validate_level("speed level", self.speed)?;
        validate_levels(&self.levels)
    }
}

/// Partial update of a card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub document_id: Option<String>,
    pub card_type: Option<String>,
    pub social: Option<u8>,
    pub wisdom: Option<u8>,
    pub speed: Option<u8>,
    pub levels: Option<Vec<SkillLevel>>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.document_id.is_none()
            && self.card_type.is_none()
            && self.social.is_none()
            && self.wisdom.is_none()
            && self.speed.is_none()
            && self.levels.is_none()
    }

    pub fn apply_to(&self, card: &Card) -> Result<Card> {
        let mut updated = card.clone();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                bail_invalid!("card name", "(empty)");
            }
            updated.name = name.clone();
        }
        if let Some(document_id) = &self.document_id {
            updated.document_id = document_id.clone();
        }
        if let Some(card_type) = &self.card_type {
            updated.card_type = card_type.clone();
        }
        if let Some(v) = self.social {
            updated.social = validate_level("social level", v)?;
        }
        if let Some(v) = self.wisdom {
            updated.wisdom = validate_level("wisdom level", v)?;
        }
        if let Some(v) = self.speed {
            updated.speed = validate_level("speed level", v)?;
        }
        if let Some(levels) = &self.levels {
            validate_levels(levels)?;
            updated.levels = levels.clone();
        }
        Ok(updated)
    }
}

/// A committed match between one project and its cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub project_id: ProjectId,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
    pub card_ids: Vec<CardId>,
}

fn validate_levels(levels: &[SkillLevel]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for l in levels {
        validate_level("technology level", l.level)?;
        if !seen.insert(l.tech_id) {
            bail_invalid!("duplicate technology", l.tech_id);
        }
    }
    Ok(())
}

fn validate_dates(starts_on: Option<NaiveDate>, ends_on: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (starts_on, ends_on) {
        if end < start {
            bail_invalid!("project dates", format!("{} ends before {}", end, start));
        }
    }
    Ok(())
}
