//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringOptions;

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration, read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Assignment acceptance rules
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Randomized team search bounds
    #[serde(default)]
    pub search: SearchConfig,

    /// SQLite connection tuning
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            matching: MatchingConfig::default(),
            search: SearchConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

/// Acceptance threshold, missing-requirement penalty and card-count bounds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Percentage an assignment must strictly exceed
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Fraction of the required level below which a requirement counts as missing
    #[serde(default = "default_missing_threshold")]
    pub missing_threshold: f64,

    /// Maximum share of the score removed when every requirement is missing
    #[serde(default = "default_missing_penalty_max")]
    pub missing_penalty_max: f64,

    /// Fewest distinct cards in a committed assignment
    #[serde(default = "default_min_cards")]
    pub min_cards: usize,

    /// Most distinct cards in a committed assignment
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            missing_threshold: default_missing_threshold(),
            missing_penalty_max: default_missing_penalty_max(),
            min_cards: default_min_cards(),
            max_cards: default_max_cards(),
        }
    }
}

impl MatchingConfig {
    /// Scoring options derived from this configuration; the missing penalty is always on
    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            apply_missing_penalty: true,
            missing_threshold: self.missing_threshold,
            missing_penalty_max: self.missing_penalty_max,
        }
    }
}

/// Team search bounds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "default_min_team_size")]
    pub min_team_size: usize,

    #[serde(default = "default_max_team_size")]
    pub max_team_size: usize,

    #[serde(default = "default_attempts")]
    pub default_attempts: usize,

    /// Hard cap on attempts per search
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_team_size: default_min_team_size(),
            max_team_size: default_max_team_size(),
            default_attempts: default_attempts(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// How long a writer waits for the database lock before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_threshold() -> f64 {
    70.0
}

fn default_missing_threshold() -> f64 {
    0.6
}

fn default_missing_penalty_max() -> f64 {
    0.25
}

fn default_min_cards() -> usize {
    2
}

fn default_max_cards() -> usize {
    5
}

fn default_min_team_size() -> usize {
    1
}

fn default_max_team_size() -> usize {
    5
}

fn default_attempts() -> usize {
    200
}

fn default_max_attempts() -> usize {
    1000
}

fn default_busy_timeout_ms() -> u64 {
    5000
}
