//! Store configuration for cardmatch
//!
//! Configuration is stored in `config.toml` at the store root. Every field has
//! a default, so a missing or partial file is valid.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{MatchError, Result};

pub use types::{
    DatabaseConfig, MatchConfig, MatchingConfig, SearchConfig, STORE_FORMAT_VERSION,
};

impl MatchConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: MatchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MatchError::InvalidStore {
                reason: format!("failed to serialize config: {}", e),
            })?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations whose bounds contradict each other
    pub fn validate(&self) -> Result<()> {
        if self.version > STORE_FORMAT_VERSION {
            return Err(MatchError::InvalidStore {
                reason: format!(
                    "config version {} is newer than supported version {}",
                    self.version, STORE_FORMAT_VERSION
                ),
            });
        }

        let m = &self.matching;
        if !(0.0..=100.0).contains(&m.threshold) {
            bail_invalid!("matching.threshold", m.threshold);
        }
        if !(0.0..=1.0).contains(&m.missing_threshold) {
            bail_invalid!("matching.missing_threshold", m.missing_threshold);
        }
        if !(0.0..=1.0).contains(&m.missing_penalty_max) {
            bail_invalid!("matching.missing_penalty_max", m.missing_penalty_max);
        }
        if m.min_cards == 0 || m.min_cards > m.max_cards {
            bail_invalid!(
                "matching card bounds",
                format!("{}..={}", m.min_cards, m.max_cards)
            );
        }

        let s = &self.search;
        if s.min_team_size == 0 || s.min_team_size > s.max_team_size {
            bail_invalid!(
                "search team size bounds",
                format!("{}..={}", s.min_team_size, s.max_team_size)
            );
        }
        if s.default_attempts == 0 || s.default_attempts > s.max_attempts {
            bail_invalid!("search.default_attempts", s.default_attempts);
        }

        Ok(())
    }
}
