//! Randomized team search
//!
//! Samples random subsets of the owner's available cards, scores each and
//! keeps the best, stopping as soon as one meets the threshold. The result is
//! advisory: the pool is a snapshot, and committing the team still goes
//! through [`crate::assignment::AssignmentManager::create`].

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::assignment::load_scorable_project;
use crate::bail_invalid;
use crate::config::MatchConfig;
use crate::db::{cards, Database};
use crate::error::{MatchError, Result};
use crate::mapper;
use crate::model::{Card, Project, ProjectId};
use crate::scoring::{round2, ScoringOptions};
use crate::trace_time;

/// Caller-supplied search knobs; `None` takes the configured default
#[derive(Debug, Clone, Default)]
pub struct TeamSearchParams {
    pub max_team_size: Option<usize>,
    pub attempts: Option<usize>,
    pub threshold: Option<f64>,
    /// Same seed, same pool ⇒ same result
    pub seed: Option<String>,
}

/// Validated search settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub max_team_size: usize,
    pub attempts: usize,
    pub threshold: f64,
}

impl TeamSearchParams {
    /// Fill defaults from `config` and reject out-of-range values
    pub fn resolve(&self, config: &MatchConfig) -> Result<SearchSettings> {
        let bounds = &config.search;

        let max_team_size = self.max_team_size.unwrap_or(bounds.max_team_size);
        if !(bounds.min_team_size..=bounds.max_team_size).contains(&max_team_size) {
            bail_invalid!(
                "max team size",
                format!(
                    "{} (expected {}-{})",
                    max_team_size, bounds.min_team_size, bounds.max_team_size
                )
            );
        }

        let attempts = self.attempts.unwrap_or(bounds.default_attempts);
        if attempts == 0 || attempts > bounds.max_attempts {
            bail_invalid!(
                "attempts",
                format!("{} (expected 1-{})", attempts, bounds.max_attempts)
            );
        }

        let threshold = self.threshold.unwrap_or(config.matching.threshold);
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            bail_invalid!("threshold", format!("{} (expected 0-100)", threshold));
        }

        Ok(SearchSettings {
            max_team_size,
            attempts,
            threshold,
        })
    }
}

/// Best team found by a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSearchResult {
    pub project_id: ProjectId,
    pub best_percentage: f64,
    pub best_cards: Vec<Card>,
    pub attempts_used: usize,
    pub threshold_reached: bool,
    pub pool_size: usize,
}

/// Outcome of sampling, as indices into the pool
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best_percentage: f64,
    pub best_team: Vec<usize>,
    pub attempts_used: usize,
    pub threshold_reached: bool,
}

/// Build the generator for one search: derived from `seed` when given,
/// otherwise from OS entropy
pub fn rng_for(seed: Option<&str>) -> StdRng {
    match seed {
        Some(seed) => {
            let digest = Sha256::digest(seed.as_bytes());
            let seed = digest
                .iter()
                .take(8)
                .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

/// Sample teams from `pool` and keep the best.
///
/// Each attempt draws a size in `1..=min(max_team_size, pool.len())`, shuffles
/// the pool and takes that prefix. Stops early once the best rounded
/// percentage meets `threshold`.
pub fn sample_best_team<R: Rng + ?Sized>(
    project: &Project,
    pool: &[Card],
    settings: &SearchSettings,
    options: &ScoringOptions,
    rng: &mut R,
) -> SearchOutcome {
    let mut outcome = SearchOutcome {
        best_percentage: -1.0,
        best_team: Vec::new(),
        attempts_used: 0,
        threshold_reached: false,
    };

    let largest = settings.max_team_size.min(pool.len());
    if largest == 0 {
        outcome.best_percentage = 0.0;
        return outcome;
    }

    let mut indices: Vec<usize> = (0..pool.len()).collect();

    for _ in 0..settings.attempts {
        outcome.attempts_used += 1;

        let size = rng.random_range(1..=largest);
        indices.shuffle(rng);
        let team = &indices[..size];

        let percentage = round2(mapper::compatibility(
            project,
            team.iter().map(|&i| &pool[i]),
            options,
        ));

        if percentage > outcome.best_percentage {
            outcome.best_percentage = percentage;
            outcome.best_team = team.to_vec();

            if percentage >= settings.threshold {
                outcome.threshold_reached = true;
                break;
            }
        }
    }

    outcome
}

/// Search the owner's available cards for a team that clears `threshold`
#[tracing::instrument(skip(db, config, params), fields(seeded = params.seed.is_some()))]
pub fn find_team(
    db: &Database,
    config: &MatchConfig,
    owner_id: &str,
    project_id: ProjectId,
    params: &TeamSearchParams,
) -> Result<TeamSearchResult> {
    let start = Instant::now();
    let settings = params.resolve(config)?;

    let (project, pool) = {
        let tx = db.read_tx()?;
        let project = load_scorable_project(&tx, owner_id, project_id)?;
        let pool = cards::list(&tx, owner_id, true)?;
        (project, pool)
    };

    if pool.is_empty() {
        return Err(MatchError::EmptyPool { project_id });
    }

    let mut rng = rng_for(params.seed.as_deref());
    let outcome = sample_best_team(
        &project,
        &pool,
        &settings,
        &config.matching.scoring_options(),
        &mut rng,
    );

    trace_time!(start, "find_team", attempts = outcome.attempts_used);
    tracing::debug!(
        project_id,
        best = outcome.best_percentage,
        attempts_used = outcome.attempts_used,
        reached = outcome.threshold_reached,
        "team search finished"
    );

    let best_cards = outcome
        .best_team
        .iter()
        .map(|&i| pool[i].clone())
        .collect();

    Ok(TeamSearchResult {
        project_id,
        best_percentage: outcome.best_percentage,
        best_cards,
        attempts_used: outcome.attempts_used,
        threshold_reached: outcome.threshold_reached,
        pool_size: pool.len(),
    })
}
