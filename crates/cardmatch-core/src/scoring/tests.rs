use super::*;

fn req(skill_id: i64, required_level: f64) -> Requirement {
    Requirement {
        skill_id,
        required_level,
    }
}

fn skill(skill_id: i64, level: f64) -> Skill {
    Skill { skill_id, level }
}

fn sample_requirements() -> Vec<Requirement> {
    vec![req(1, 5.0), req(2, 8.0), req(3, 3.0), req(-1, 6.0), req(-2, 4.0)]
}

fn sample_skills() -> Vec<Skill> {
    vec![
        skill(1, 4.0),
        skill(2, 9.0),
        skill(3, 1.0),
        skill(-1, 6.0),
        skill(-2, 2.0),
        skill(7, 10.0),
    ]
}

#[test]
fn test_empty_requirements_score_zero() {
    let options = ScoringOptions::default();
    assert_eq!(score(&[], &sample_skills(), &options), 0.0);
    assert_eq!(score(&[], &[], &options), 0.0);
}

#[test]
fn test_invalid_requirements_only_score_zero() {
    let reqs = vec![req(1, 0.0), req(2, -3.0), req(3, f64::NAN), req(4, f64::INFINITY)];
    assert_eq!(score(&reqs, &sample_skills(), &ScoringOptions::default()), 0.0);
}

#[test]
fn test_full_coverage_scores_hundred() {
    let reqs = sample_requirements();
    let skills: Vec<Skill> = reqs
        .iter()
        .map(|r| skill(r.skill_id, r.required_level))
        .collect();
    assert_eq!(score(&reqs, &skills, &ScoringOptions::default()), 100.0);
}

#[test]
fn test_over_qualification_is_capped() {
    let reqs = vec![req(1, 5.0), req(2, 5.0)];
    let skills = vec![skill(1, 10.0), skill(2, 0.0)];
    let options = ScoringOptions {
        apply_missing_penalty: false,
        ..Default::default()
    };
    assert_eq!(score(&reqs, &skills, &options), 50.0);
}

#[test]
fn test_weighting_by_required_level() {
    // Meeting the heavy requirement counts more than meeting the light one
    let reqs = vec![req(1, 9.0), req(2, 1.0)];
    let options = ScoringOptions {
        apply_missing_penalty: false,
        ..Default::default()
    };
    let heavy = score(&reqs, &[skill(1, 9.0)], &options);
    let light = score(&reqs, &[skill(2, 1.0)], &options);
    assert_eq!(heavy, 90.0);
    assert_eq!(light, 10.0);
}

#[test]
fn test_missing_penalty_applied() {
    // One requirement fully met, one completely absent
    let reqs = vec![req(1, 5.0), req(2, 5.0)];
    let skills = vec![skill(1, 5.0)];
    let result = score(&reqs, &skills, &ScoringOptions::default());
    // base 50, half missing => factor 1 - 0.5 * 0.25
    assert!((result - 43.75).abs() < 1e-9);
}

#[test]
fn test_missing_threshold_boundary_not_missing() {
    // have == required * threshold is not missing
    let reqs = vec![req(1, 10.0)];
    let with_penalty = score(&reqs, &[skill(1, 6.0)], &ScoringOptions::default());
    assert!((with_penalty - 60.0).abs() < 1e-9);
}

#[test]
fn test_penalty_disabled() {
    let reqs = vec![req(1, 5.0), req(2, 5.0)];
    let skills = vec![skill(1, 5.0)];
    let options = ScoringOptions {
        apply_missing_penalty: false,
        ..Default::default()
    };
    assert_eq!(score(&reqs, &skills, &options), 50.0);
}

#[test]
fn test_negative_and_non_finite_levels_ignored() {
    let reqs = vec![req(1, 4.0)];
    let skills = vec![skill(1, -5.0), skill(1, f64::NAN), skill(1, f64::NEG_INFINITY)];
    let options = ScoringOptions {
        apply_missing_penalty: false,
        ..Default::default()
    };
    assert_eq!(score(&reqs, &skills, &options), 0.0);
}

#[test]
fn test_score_within_bounds() {
    let options = ScoringOptions::default();
    let cases: Vec<(Vec<Requirement>, Vec<Skill>)> = vec![
        (sample_requirements(), sample_skills()),
        (sample_requirements(), vec![]),
        (vec![req(1, 1.0)], vec![skill(1, 1000.0)]),
        (vec![req(1, 1e-9)], vec![skill(1, 1e9)]),
        (vec![req(1, 10.0), req(2, 10.0)], vec![skill(3, 10.0)]),
    ];
    for (reqs, skills) in cases {
        let s = score(&reqs, &skills, &options);
        assert!((0.0..=100.0).contains(&s), "score {} out of range", s);
    }
}

#[test]
fn test_permutation_invariance() {
    let options = ScoringOptions::default();
    let reqs = sample_requirements();
    let skills = sample_skills();
    let expected = score(&reqs, &skills, &options);

    let mut reqs_rev = reqs.clone();
    reqs_rev.reverse();
    let mut skills_rev = skills.clone();
    skills_rev.reverse();
    assert_eq!(score(&reqs_rev, &skills_rev, &options), expected);

    let mut skills_rot = skills.clone();
    skills_rot.rotate_left(2);
    let mut reqs_rot = reqs.clone();
    reqs_rot.rotate_left(3);
    assert_eq!(score(&reqs_rot, &skills_rot, &options), expected);
}

#[test]
fn test_duplicate_rows_do_not_double_count() {
    let options = ScoringOptions::default();
    let reqs = sample_requirements();
    let skills = sample_skills();
    let expected = score(&reqs, &skills, &options);

    let mut reqs_dup = reqs.clone();
    reqs_dup.push(reqs[1]);
    let mut skills_dup = skills.clone();
    skills_dup.push(skills[0]);
    skills_dup.push(skills[0]);
    assert_eq!(score(&reqs_dup, &skills_dup, &options), expected);
}

#[test]
fn test_maximum_wins_across_rows() {
    let options = ScoringOptions::default();
    // A weaker duplicate requirement row and a weaker skill row change nothing
    let reqs = vec![req(1, 8.0), req(1, 2.0)];
    let skills = vec![skill(1, 3.0), skill(1, 8.0)];
    assert_eq!(score(&reqs, &skills, &options), 100.0);
}

#[test]
fn test_monotonic_in_skill_level() {
    let options = ScoringOptions::default();
    let reqs = sample_requirements();
    let base_skills = sample_skills();

    for idx in 0..base_skills.len() {
        let mut previous = score(&reqs, &base_skills, &options);
        for bump in 1..=12 {
            let mut skills = base_skills.clone();
            skills[idx].level += bump as f64;
            let current = score(&reqs, &skills, &options);
            assert!(
                current >= previous,
                "raising skill {} lowered score {} -> {}",
                skills[idx].skill_id,
                previous,
                current
            );
            previous = current;
        }
    }
}

#[test]
fn test_round2() {
    assert_eq!(round2(69.999_999), 70.0);
    assert_eq!(round2(43.756), 43.76);
    assert_eq!(round2(0.0), 0.0);
}
