//! Compatibility scoring between requirements and a team's skills
//!
//! Each requirement contributes `clamp(have / required, 0, 1)` weighted by its
//! required level, so over-qualification on one skill never covers a gap on
//! another. An optional penalty scales the result down by the share of
//! requirements that are badly unmet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A demanded level for one skill (technology id or trait sentinel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub skill_id: i64,
    pub required_level: f64,
}

/// An offered level for one skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i64,
    pub level: f64,
}

/// Missing-requirement penalty policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringOptions {
    pub apply_missing_penalty: bool,
    /// A requirement is missing when `have < required * missing_threshold`
    pub missing_threshold: f64,
    /// Share of the score removed when every requirement is missing
    pub missing_penalty_max: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            apply_missing_penalty: true,
            missing_threshold: 0.6,
            missing_penalty_max: 0.25,
        }
    }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Per-skill maximum of the required levels, dropping non-finite and non-positive rows
fn reduce_requirements(requirements: &[Requirement]) -> BTreeMap<i64, f64> {
    let mut required = BTreeMap::new();
    for r in requirements {
        if !r.required_level.is_finite() || r.required_level <= 0.0 {
            continue;
        }
        let entry = required.entry(r.skill_id).or_insert(0.0_f64);
        *entry = entry.max(r.required_level);
    }
    required
}

/// Per-skill maximum of the offered levels, dropping non-finite and negative rows
fn reduce_skills(skills: &[Skill]) -> BTreeMap<i64, f64> {
    let mut have = BTreeMap::new();
    for s in skills {
        if !s.level.is_finite() || s.level < 0.0 {
            continue;
        }
        let entry = have.entry(s.skill_id).or_insert(0.0_f64);
        *entry = entry.max(s.level);
    }
    have
}

/// Compute the compatibility percentage in `[0, 100]`.
///
/// Never fails: malformed levels are ignored and an empty (or fully invalid)
/// requirement set scores 0.
pub fn score(requirements: &[Requirement], skills: &[Skill], options: &ScoringOptions) -> f64 {
    let required = reduce_requirements(requirements);
    let have = reduce_skills(skills);

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    let mut missing = 0usize;

    for (skill_id, &req) in &required {
        let level = have.get(skill_id).copied().unwrap_or(0.0);

        weighted_sum += clamp(level / req, 0.0, 1.0) * req;
        weight_sum += req;

        if options.apply_missing_penalty && level < req * options.missing_threshold {
            missing += 1;
        }
    }

    if weight_sum == 0.0 {
        return 0.0;
    }

    let base = weighted_sum / weight_sum * 100.0;

    if !options.apply_missing_penalty {
        return clamp(base, 0.0, 100.0);
    }

    let missing_ratio = missing as f64 / required.len() as f64;
    let penalty = 1.0 - missing_ratio * options.missing_penalty_max;

    clamp(base * penalty, 0.0, 100.0)
}

/// Round a percentage to the two decimals that are stored and reported
pub fn round2(percentage: f64) -> f64 {
    (percentage * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
