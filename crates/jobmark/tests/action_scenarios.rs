//! End-to-end action cycles over shared services.
//!
//! Covers confirmation gating, grace-window commit and undo, listing views
//! during the grace window, and independent controllers on the same store.

mod common;

use std::time::Duration;

use common::{skip_all, RecordingConfirmer, TestHarness, GRACE};
use jobmark::{
    visible, visible_with_pending, ActionKind, ActionOutcome, ActionSetSnapshot, ActionState,
    ConfirmationOutcome, JobId, ListingScope, PreferenceSnapshot,
};

fn catalog() -> Vec<JobId> {
    vec![JobId::from("007"), JobId::from(42u64), JobId::from("mock-fav-1")]
}

#[test]
fn test_favorite_integer_seven_matches_padded_catalog_entry() {
    let services = TestHarness::memory_services(ActionSetSnapshot::default(), skip_all());
    services
        .action_sets
        .toggle(ActionKind::Favorite, &JobId::from(7u64));

    assert!(services
        .action_sets
        .contains(ActionKind::Favorite, &JobId::from("007")));

    let catalog = catalog();
    let favorites = visible(&catalog, ListingScope::Favorite, &services.action_sets);
    assert_eq!(favorites, vec![&catalog[0]]);
}

#[tokio::test(start_paused = true)]
async fn test_hide_without_skip_then_cancel_changes_nothing() {
    let services =
        TestHarness::memory_services(ActionSetSnapshot::default(), PreferenceSnapshot::default());
    let controller = services.controller(42u64);

    assert_eq!(
        controller.request(ActionKind::Hidden).unwrap(),
        ActionState::ConfirmPending(ActionKind::Hidden)
    );
    assert_eq!(controller.cancel().unwrap(), ActionState::Normal);

    tokio::time::sleep(GRACE * 2).await;
    assert!(!services
        .action_sets
        .contains(ActionKind::Hidden, &JobId::from(42u64)));
}

#[tokio::test(start_paused = true)]
async fn test_archive_with_skip_commits_mock_id_after_grace() {
    let services = TestHarness::memory_services(
        ActionSetSnapshot::default(),
        PreferenceSnapshot {
            archive: true,
            ..Default::default()
        },
    );
    let controller = services.controller("mock-fav-1");

    assert!(controller.request(ActionKind::Archive).unwrap().is_committing());

    tokio::time::sleep(GRACE + Duration::from_millis(1)).await;
    assert!(services
        .action_sets
        .contains(ActionKind::Archive, &JobId::from("mock-fav-1")));
    assert_eq!(controller.state(), ActionState::Normal);
    assert_eq!(
        services.action_sets.all(ActionKind::Archive),
        vec!["mock-fav-1".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_skip_preference_never_prompts() {
    let confirmer = RecordingConfirmer::new(ConfirmationOutcome::cancelled());
    let services = TestHarness::memory_services(ActionSetSnapshot::default(), skip_all())
        .with_confirmer(confirmer.clone());

    for kind in ActionKind::ALL {
        let controller = services.controller(100u64);
        let state = controller.request_with_confirmation(kind).await.unwrap();
        assert!(state.is_committing());
        controller.undo().unwrap();
    }

    assert!(confirmer.prompts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dont_ask_again_applies_to_next_request() {
    let confirmer = RecordingConfirmer::new(ConfirmationOutcome::accepted_and_skip());
    let services =
        TestHarness::memory_services(ActionSetSnapshot::default(), PreferenceSnapshot::default())
            .with_confirmer(confirmer.clone());

    let first = services.controller(1u64);
    first
        .request_with_confirmation(ActionKind::Hidden)
        .await
        .unwrap();
    tokio::time::sleep(GRACE + Duration::from_millis(1)).await;

    let second = services.controller(2u64);
    second
        .request_with_confirmation(ActionKind::Hidden)
        .await
        .unwrap();

    assert_eq!(confirmer.prompts(), vec![ActionKind::Hidden]);
}

#[tokio::test(start_paused = true)]
async fn test_undo_and_commit_emit_events() {
    let services = TestHarness::memory_services(ActionSetSnapshot::default(), skip_all());
    let mut events = services.notifier.subscribe();

    let undone = services.controller("007");
    undone.request(ActionKind::Favorite).unwrap();
    undone.undo().unwrap();

    let committed = services.controller(42u64);
    committed.request(ActionKind::Hidden).unwrap();
    tokio::time::sleep(GRACE + Duration::from_millis(1)).await;

    let first = events.recv().await.unwrap();
    assert_eq!(first.outcome, ActionOutcome::Undone);
    assert_eq!(first.kind, ActionKind::Favorite);
    assert!(!first.member);

    let second = events.recv().await.unwrap();
    assert_eq!(second.outcome, ActionOutcome::Committed);
    assert_eq!(second.kind, ActionKind::Hidden);
    assert_eq!(second.id, JobId::from(42u64));
    assert!(second.member);
}

#[tokio::test(start_paused = true)]
async fn test_unfavorite_from_favorites_list_leaves_during_grace() {
    let services = TestHarness::memory_services(
        ActionSetSnapshot {
            favorites: vec!["007".to_string(), "mock-fav-1".to_string()],
            ..Default::default()
        },
        skip_all(),
    );
    let catalog = catalog();
    let controller = services.controller(7u64);
    controller.request(ActionKind::Favorite).unwrap();

    let listed = visible_with_pending(
        &catalog,
        ListingScope::Favorite,
        &services.action_sets,
        &services.pending,
    );
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].leaving, Some(ActionKind::Favorite));
    assert_eq!(listed[1].leaving, None);

    tokio::time::sleep(GRACE + Duration::from_millis(1)).await;

    let listed = visible_with_pending(
        &catalog,
        ListingScope::Favorite,
        &services.action_sets,
        &services.pending,
    );
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].job.raw(), "mock-fav-1");
}

#[tokio::test(start_paused = true)]
async fn test_hidden_job_leaves_every_scope_after_commit() {
    let services = TestHarness::memory_services(
        ActionSetSnapshot {
            favorites: vec!["042".to_string()],
            archived: vec!["042".to_string()],
            ..Default::default()
        },
        skip_all(),
    );
    let controller = services.controller(42u64);
    controller.request(ActionKind::Hidden).unwrap();
    tokio::time::sleep(GRACE + Duration::from_millis(1)).await;

    let catalog = catalog();
    let sets = &services.action_sets;
    for scope in [ListingScope::All, ListingScope::Favorite, ListingScope::Archived] {
        assert!(
            !visible(&catalog, scope, sets).contains(&&catalog[1]),
            "job 42 still visible in {}",
            scope
        );
    }
    assert_eq!(visible(&catalog, ListingScope::Hidden, sets), vec![&catalog[1]]);
}

#[tokio::test(start_paused = true)]
async fn test_independent_controllers_on_different_kinds() {
    let services = TestHarness::memory_services(ActionSetSnapshot::default(), skip_all());
    let card_in_all = services.controller(42u64);
    let card_in_favorites = services.controller("042");

    card_in_all.request(ActionKind::Hidden).unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;
    card_in_favorites.request(ActionKind::Favorite).unwrap();

    tokio::time::sleep(GRACE * 2).await;
    let id = JobId::from(42u64);
    assert!(services.action_sets.contains(ActionKind::Hidden, &id));
    assert!(services.action_sets.contains(ActionKind::Favorite, &id));
    assert!(services.pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_cycles_restore_membership() {
    let services = TestHarness::memory_services(ActionSetSnapshot::default(), skip_all());
    let controller = services.controller("mock-fav-1");
    let id = JobId::from("mock-fav-1");

    for expected in [true, false, true, false] {
        controller.request(ActionKind::Favorite).unwrap();
        tokio::time::sleep(GRACE + Duration::from_millis(1)).await;
        assert_eq!(
            services.action_sets.contains(ActionKind::Favorite, &id),
            expected
        );
    }
}
