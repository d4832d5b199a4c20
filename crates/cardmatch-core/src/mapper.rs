//! Adapts projects and cards into the flat requirement/skill shape scored by
//! [`crate::scoring`].
//!
//! The three scalar axes ride along as synthetic skills with reserved negative
//! ids. A team's traits combine by per-axis maximum, same as technologies.

use crate::model::{Card, Project};
use crate::scoring::{self, Requirement, ScoringOptions, Skill};

/// Project collaboration demand / card social trait
pub const COLLABORATION_SKILL_ID: i64 = -1;
/// Project organization demand / card wisdom trait
pub const ORGANIZATION_SKILL_ID: i64 = -2;
/// Project delivery speed demand / card speed trait
pub const DELIVERY_SPEED_SKILL_ID: i64 = -3;

/// Requirements declared by a project plus its three demand axes
pub fn map_requirements(project: &Project) -> Vec<Requirement> {
    let mut requirements: Vec<Requirement> = project
        .levels
        .iter()
        .map(|l| Requirement {
            skill_id: l.tech_id,
            required_level: f64::from(l.level),
        })
        .collect();

    requirements.extend([
        Requirement {
            skill_id: COLLABORATION_SKILL_ID,
            required_level: f64::from(project.collaboration),
        },
        Requirement {
            skill_id: ORGANIZATION_SKILL_ID,
            required_level: f64::from(project.organization),
        },
        Requirement {
            skill_id: DELIVERY_SPEED_SKILL_ID,
            required_level: f64::from(project.delivery_speed),
        },
    ]);

    requirements
}

/// Skills offered by a set of cards, traits included
pub fn map_skills<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<Skill> {
    let mut skills = Vec::new();
    for card in cards {
        skills.extend(card.levels.iter().map(|l| Skill {
            skill_id: l.tech_id,
            level: f64::from(l.level),
        }));
        skills.extend([
            Skill {
                skill_id: COLLABORATION_SKILL_ID,
                level: f64::from(card.social),
            },
            Skill {
                skill_id: ORGANIZATION_SKILL_ID,
                level: f64::from(card.wisdom),
            },
            Skill {
                skill_id: DELIVERY_SPEED_SKILL_ID,
                level: f64::from(card.speed),
            },
        ]);
    }
    skills
}

/// Unrounded compatibility of `cards` as a team for `project`
pub fn compatibility<'a>(
    project: &Project,
    cards: impl IntoIterator<Item = &'a Card>,
    options: &ScoringOptions,
) -> f64 {
    scoring::score(&map_requirements(project), &map_skills(cards), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectStatus, SkillLevel};
    use chrono::Utc;

    const SKILL_A: i64 = 1;

    fn project(levels: Vec<SkillLevel>, demand: u8) -> Project {
        Project {
            id: 1,
            owner_id: "owner".to_string(),
            name: "Project".to_string(),
            description: None,
            status: ProjectStatus::Waiting,
            collaboration: demand,
            organization: demand,
            delivery_speed: demand,
            starts_on: None,
            ends_on: None,
            created_at: Utc::now(),
            levels,
            assignment_id: None,
        }
    }

    fn card(id: i64, levels: Vec<SkillLevel>, traits: u8) -> Card {
        Card {
            id,
            owner_id: "owner".to_string(),
            name: format!("Card {}", id),
            document_id: id.to_string(),
            card_type: "dev".to_string(),
            social: traits,
            wisdom: traits,
            speed: traits,
            created_at: Utc::now(),
            levels,
            assignment_id: None,
        }
    }

    fn level(tech_id: i64, level: u8) -> SkillLevel {
        SkillLevel { tech_id, level }
    }

    #[test]
    fn test_requirements_include_demand_axes() {
        let p = project(vec![level(SKILL_A, 5)], 7);
        let reqs = map_requirements(&p);
        assert_eq!(reqs.len(), 4);
        for sentinel in [
            COLLABORATION_SKILL_ID,
            ORGANIZATION_SKILL_ID,
            DELIVERY_SPEED_SKILL_ID,
        ] {
            let r = reqs.iter().find(|r| r.skill_id == sentinel).unwrap();
            assert_eq!(r.required_level, 7.0);
        }
    }

    #[test]
    fn test_skills_include_each_card_traits() {
        let cards = [card(1, vec![level(SKILL_A, 3)], 4), card(2, vec![], 9)];
        let skills = map_skills(&cards);
        assert_eq!(skills.len(), 1 + 3 + 3);
        let collab: Vec<f64> = skills
            .iter()
            .filter(|s| s.skill_id == COLLABORATION_SKILL_ID)
            .map(|s| s.level)
            .collect();
        assert_eq!(collab, vec![4.0, 9.0]);
    }

    #[test]
    fn test_team_strengths_combine_by_maximum() {
        let p = project(vec![level(SKILL_A, 5)], 5);
        let x = card(1, vec![level(SKILL_A, 10)], 8);
        let y = card(2, vec![level(SKILL_A, 2)], 2);
        let options = ScoringOptions::default();

        assert_eq!(compatibility(&p, [&x, &y], &options), 100.0);

        let alone = compatibility(&p, [&y], &options);
        assert!(alone < 100.0);
        // 2/5 coverage everywhere, every requirement missing
        assert!((alone - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_weaker_teammate_does_not_drag_traits_down() {
        let p = project(vec![], 8);
        let strong = card(1, vec![], 8);
        let weak = card(2, vec![], 1);
        let options = ScoringOptions::default();
        assert_eq!(compatibility(&p, [&strong, &weak], &options), 100.0);
    }
}
