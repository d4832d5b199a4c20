use super::*;
use crate::config::MatchingConfig;
use crate::model::NewProject;
use crate::store::fixtures::{level, Fixture, OTHER_OWNER, OWNER};

#[test]
fn test_normalize_card_ids() {
    assert_eq!(normalize_card_ids(&[3, 1, 3, 2, 1], 2, 5).unwrap(), vec![3, 1, 2]);
    assert!(matches!(
        normalize_card_ids(&[4, 4], 2, 5),
        Err(MatchError::CardCount { count: 1, min: 2, max: 5 })
    ));
    assert!(matches!(
        normalize_card_ids(&[1, 2, 3, 4, 5, 6], 2, 5),
        Err(MatchError::CardCount { count: 6, .. })
    ));
}

#[test]
fn test_create_assignment() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");

    let created = fx
        .store
        .assignments()
        .create(OWNER, project.id, &[ada.id, weak.id, ada.id])
        .unwrap();
    assert_eq!(created.percentage, 100.0);
    assert_eq!(created.project_name, "Portal");
    assert_eq!(created.card_ids, vec![ada.id, weak.id]);

    let detail = fx
        .store
        .assignments()
        .show(OWNER, created.assignment_id)
        .unwrap();
    assert_eq!(detail.project.assignment_id, Some(created.assignment_id));
    assert_eq!(detail.assignment.card_ids, vec![ada.id, weak.id]);
    assert!(detail
        .cards
        .iter()
        .all(|c| c.assignment_id == Some(created.assignment_id)));

    let listed = fx.store.assignments().list(OWNER).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].card_count, 2);
}

#[test]
fn test_percentage_equal_to_threshold_is_rejected() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let grace = fx.card(OWNER, "Grace", 5, vec![level(fx.rust, 8)]);
    let weak = fx.weak_card(OWNER, "Weak");

    let percentage = fx
        .store
        .assignments()
        .preview(OWNER, project.id, &[grace.id, weak.id])
        .unwrap();
    assert!(percentage > 0.0 && percentage < 100.0);

    let at_threshold = MatchingConfig {
        threshold: percentage,
        ..MatchingConfig::default()
    };
    let err = AssignmentManager::new(fx.store.db(), &at_threshold)
        .create(OWNER, project.id, &[grace.id, weak.id])
        .unwrap_err();
    match err {
        MatchError::InsufficientCompatibility {
            percentage: p,
            threshold,
        } => {
            assert_eq!(p, percentage);
            assert_eq!(threshold, percentage);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fx.store.list_cards(OWNER, true).unwrap().len() == 2);

    let just_below = MatchingConfig {
        threshold: percentage - 0.01,
        ..MatchingConfig::default()
    };
    let created = AssignmentManager::new(fx.store.db(), &just_below)
        .create(OWNER, project.id, &[grace.id, weak.id])
        .unwrap();
    assert_eq!(created.percentage, percentage);
}

#[test]
fn test_low_compatibility_leaves_no_trace() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let a = fx.weak_card(OWNER, "A");
    let b = fx.weak_card(OWNER, "B");

    let err = fx
        .store
        .assignments()
        .create(OWNER, project.id, &[a.id, b.id])
        .unwrap_err();
    assert!(matches!(err, MatchError::InsufficientCompatibility { .. }));

    assert!(fx.store.assignments().list(OWNER).unwrap().is_empty());
    assert_eq!(fx.store.get_project(OWNER, project.id).unwrap().assignment_id, None);
    assert_eq!(fx.store.list_cards(OWNER, true).unwrap().len(), 2);
}

#[test]
fn test_project_already_assigned() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");
    let linus = fx.strong_card(OWNER, "Linus");
    let spare = fx.weak_card(OWNER, "Spare");

    let first = fx
        .store
        .assignments()
        .create(OWNER, project.id, &[ada.id, weak.id])
        .unwrap();
    let err = fx
        .store
        .assignments()
        .create(OWNER, project.id, &[linus.id, spare.id])
        .unwrap_err();

    match err {
        MatchError::ProjectAlreadyAssigned {
            project_id,
            assignment_id,
        } => {
            assert_eq!(project_id, project.id);
            assert_eq!(assignment_id, first.assignment_id);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fx.store.list_cards(OWNER, true).unwrap().len(), 2);
}

#[test]
fn test_card_conflict_names_first_offender() {
    let fx = Fixture::new();
    let portal = fx.project(OWNER, "Portal");
    let billing = fx.project(OWNER, "Billing");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");
    let linus = fx.strong_card(OWNER, "Linus");

    let first = fx
        .store
        .assignments()
        .create(OWNER, portal.id, &[ada.id, weak.id])
        .unwrap();
    let err = fx
        .store
        .assignments()
        .create(OWNER, billing.id, &[linus.id, weak.id, ada.id])
        .unwrap_err();

    match err {
        MatchError::CardAlreadyAssigned {
            card_id,
            card_name,
            assignment_id,
        } => {
            assert_eq!(card_id, weak.id);
            assert_eq!(card_name, "Weak");
            assert_eq!(assignment_id, first.assignment_id);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing of the failed attempt survives
    assert_eq!(fx.store.get_card(OWNER, linus.id).unwrap().assignment_id, None);
    assert_eq!(fx.store.get_project(OWNER, billing.id).unwrap().assignment_id, None);
}

#[test]
fn test_card_count_bounds() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let ids: Vec<CardId> = (0..6)
        .map(|i| fx.weak_card(OWNER, &format!("C{i}")).id)
        .collect();

    let manager = fx.store.assignments();
    assert!(matches!(
        manager.create(OWNER, project.id, &ids[..1]),
        Err(MatchError::CardCount { .. })
    ));
    assert!(matches!(
        manager.create(OWNER, project.id, &[ids[0], ids[0]]),
        Err(MatchError::CardCount { .. })
    ));
    assert!(matches!(
        manager.create(OWNER, project.id, &ids),
        Err(MatchError::CardCount { .. })
    ));
    assert!(matches!(
        manager.preview(OWNER, project.id, &ids),
        Err(MatchError::CardCount { .. })
    ));
}

#[test]
fn test_project_without_requirements() {
    let fx = Fixture::new();
    let project = fx
        .store
        .create_project(
            OWNER,
            &NewProject {
                name: "Open brief".to_string(),
                description: None,
                collaboration: 5,
                organization: 5,
                delivery_speed: 5,
                starts_on: None,
                ends_on: None,
                levels: vec![],
            },
        )
        .unwrap();
    let a = fx.strong_card(OWNER, "A");
    let b = fx.strong_card(OWNER, "B");

    let manager = fx.store.assignments();
    assert!(matches!(
        manager.create(OWNER, project.id, &[a.id, b.id]),
        Err(MatchError::NoRequirements { .. })
    ));
    assert!(matches!(
        manager.preview(OWNER, project.id, &[a.id, b.id]),
        Err(MatchError::NoRequirements { .. })
    ));
}

#[test]
fn test_foreign_entities_are_not_found() {
    let fx = Fixture::new();
    let mine = fx.project(OWNER, "Portal");
    let theirs = fx.project(OTHER_OWNER, "Theirs");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");
    let foreign = fx.strong_card(OTHER_OWNER, "Foreign");

    let manager = fx.store.assignments();
    assert!(matches!(
        manager.create(OWNER, theirs.id, &[ada.id, weak.id]),
        Err(MatchError::NotFound { ref entity, .. }) if entity == "project"
    ));
    assert!(matches!(
        manager.create(OWNER, mine.id, &[ada.id, foreign.id]),
        Err(MatchError::NotFound { ref entity, .. }) if entity == "card"
    ));
    assert!(matches!(
        manager.create(OWNER, mine.id, &[ada.id, 9999]),
        Err(MatchError::NotFound { .. })
    ));

    let created = manager.create(OWNER, mine.id, &[ada.id, weak.id]).unwrap();
    assert!(matches!(
        manager.dissolve(OTHER_OWNER, created.assignment_id),
        Err(MatchError::NotFound { .. })
    ));
    assert!(matches!(
        manager.show(OTHER_OWNER, created.assignment_id),
        Err(MatchError::NotFound { .. })
    ));
    assert!(manager.list(OTHER_OWNER).unwrap().is_empty());
}

#[test]
fn test_preview_has_no_gate_and_no_effect() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let a = fx.weak_card(OWNER, "A");
    let b = fx.weak_card(OWNER, "B");

    let manager = fx.store.assignments();
    let low = manager.preview(OWNER, project.id, &[a.id, b.id]).unwrap();
    assert!(low < 70.0);
    assert!(manager.list(OWNER).unwrap().is_empty());

    // Assigned cards may still be previewed
    let ada = fx.strong_card(OWNER, "Ada");
    manager.create(OWNER, project.id, &[ada.id, a.id]).unwrap();
    let other = fx.project(OWNER, "Other");
    assert_eq!(manager.preview(OWNER, other.id, &[ada.id, a.id]).unwrap(), 100.0);
}

#[test]
fn test_dissolve_releases_cards() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");

    let manager = fx.store.assignments();
    let created = manager.create(OWNER, project.id, &[ada.id, weak.id]).unwrap();
    assert!(fx.store.list_cards(OWNER, true).unwrap().is_empty());

    let dissolved = manager.dissolve(OWNER, created.assignment_id).unwrap();
    assert_eq!(dissolved.released_cards, 2);
    assert_eq!(dissolved.project_id, project.id);
    assert_eq!(fx.store.list_cards(OWNER, true).unwrap().len(), 2);
    assert_eq!(fx.store.get_project(OWNER, project.id).unwrap().assignment_id, None);

    assert!(matches!(
        manager.dissolve(OWNER, created.assignment_id),
        Err(MatchError::NotFound { .. })
    ));

    // The project can be matched again
    manager.create(OWNER, project.id, &[ada.id, weak.id]).unwrap();
}

#[test]
fn test_missing_penalty_always_applies() {
    let fx = Fixture::new();
    let project = fx.project(OWNER, "Portal");
    let half = fx.card(OWNER, "Half", 5, vec![level(fx.rust, 4), level(fx.sql, 3)]);
    let idle = fx.card(OWNER, "Idle", 1, Vec::new());

    // Unpenalised this team scores 75.86; two of five requirements are under 60%
    let config: MatchingConfig =
        toml::from_str("threshold = 70.0\napply_missing_penalty = false\n").unwrap();
    let manager = AssignmentManager::new(fx.store.db(), &config);

    assert_eq!(
        manager.preview(OWNER, project.id, &[half.id, idle.id]).unwrap(),
        68.28
    );
    match manager.create(OWNER, project.id, &[half.id, idle.id]).unwrap_err() {
        MatchError::InsufficientCompatibility { percentage, threshold } => {
            assert_eq!(percentage, 68.28);
            assert_eq!(threshold, 70.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fx.store.assignments().list(OWNER).unwrap().is_empty());
}

#[test]
fn test_guarded_assign_names_current_holder() {
    let fx = Fixture::new();
    let portal = fx.project(OWNER, "Portal");
    let billing = fx.project(OWNER, "Billing");
    let ada = fx.strong_card(OWNER, "Ada");
    let weak = fx.weak_card(OWNER, "Weak");

    let first = fx
        .store
        .assignments()
        .create(OWNER, portal.id, &[ada.id, weak.id])
        .unwrap();

    let tx = fx.store.db().write_tx().unwrap();
    let pending = assignments::insert(&tx, billing.id, 90.0, Utc::now()).unwrap();
    match assign_card(&tx, &weak, pending).unwrap_err() {
        MatchError::CardAlreadyAssigned {
            card_id,
            card_name,
            assignment_id,
        } => {
            assert_eq!(card_id, weak.id);
            assert_eq!(card_name, "Weak");
            assert_eq!(assignment_id, first.assignment_id);
            assert_ne!(assignment_id, pending);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    drop(tx);

    assert_eq!(fx.store.get_project(OWNER, billing.id).unwrap().assignment_id, None);
}
