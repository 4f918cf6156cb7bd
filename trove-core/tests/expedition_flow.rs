//! Integration tests for the expedition driver.
//!
//! These drive the public API end to end with the instant `MockMap`:
//! the full nine-step run, the persistence subset, failure injection, the
//! re-entrancy guard, and reset behavior.

use tempfile::TempDir;
use trove_core::testing::MockMap;
use trove_core::{
    expedition_plan, Expedition, ExpeditionError, RunState, StateStore, StepOutcome, PLAN_LEN,
};

async fn run_to_end(expedition: &mut Expedition<MockMap>) -> Vec<StepOutcome> {
    expedition.begin().expect("begin");
    let mut outcomes = Vec::new();
    while let Some(outcome) = expedition.advance().await.expect("advance") {
        outcomes.push(outcome);
    }
    outcomes
}

#[tokio::test]
async fn test_full_run_executes_all_nine_steps_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let mut expedition = Expedition::new(MockMap::new(), StateStore::new(dir.path()))
        .await
        .expect("create");

    let outcomes = run_to_end(&mut expedition).await;

    assert_eq!(outcomes.len(), PLAN_LEN);
    assert_eq!(expedition.run_state(), RunState::Completed);

    // Steps came back in plan order, with the plan's waypoints and
    // landmarks attached.
    for (i, (outcome, step)) in outcomes.iter().zip(expedition_plan()).enumerate() {
        assert_eq!(outcome.index, i);
        assert_eq!(outcome.waypoint, step.waypoint);
        assert_eq!(outcome.landmark, step.landmark);
        assert_eq!(outcome.recorded, step.record);
    }
}

#[tokio::test]
async fn test_history_persists_exactly_the_recording_steps() {
    let dir = TempDir::new().expect("temp dir");
    let store = StateStore::new(dir.path());
    let mut expedition = Expedition::new(MockMap::new(), store.clone())
        .await
        .expect("create");

    run_to_end(&mut expedition).await;

    // The three key finds and the key combination are logged but never
    // persisted; the victory message never reaches history either.
    let expected = ["clue", "location", "chest", "puzzle", "treasure"];
    assert_eq!(expedition.history(), &expected);

    let saved = store.load().await.expect("load");
    assert_eq!(saved.history, expected);
}

#[tokio::test]
async fn test_waypoint_sequence_matches_the_plan() {
    let dir = TempDir::new().expect("temp dir");
    let mut expedition = Expedition::new(MockMap::new(), StateStore::new(dir.path()))
        .await
        .expect("create");

    run_to_end(&mut expedition).await;

    let expected: Vec<_> = expedition_plan().iter().map(|s| s.waypoint).collect();
    assert_eq!(expedition.waypoints(), expected.as_slice());
}

#[tokio::test]
async fn test_failure_on_first_key_stops_the_run() {
    let dir = TempDir::new().expect("temp dir");
    let store = StateStore::new(dir.path());
    // Call index 4 is the fifth operation: the first find-key.
    let mut expedition = Expedition::new(MockMap::failing_at(4), store.clone())
        .await
        .expect("create");

    expedition.begin().expect("begin");
    let mut outcomes = Vec::new();
    let error = loop {
        match expedition.advance().await {
            Ok(Some(outcome)) => outcomes.push(outcome),
            Ok(None) => panic!("run should fail before completing"),
            Err(e) => break e,
        }
    };

    assert!(matches!(error, ExpeditionError::Map(_)));
    assert_eq!(expedition.run_state(), RunState::Failed);

    // Four steps applied, nothing from steps 5-9.
    assert_eq!(outcomes.len(), 4);
    assert_eq!(expedition.waypoints().len(), 4);
    assert_eq!(
        expedition.history(),
        &["clue", "location", "chest", "puzzle"]
    );
    let saved = store.load().await.expect("load");
    assert_eq!(saved.history.len(), 4);

    // No resumption: the failed run does not advance further.
    assert!(expedition.advance().await.expect("advance").is_none());
    assert_eq!(expedition.run_state(), RunState::Failed);
}

#[tokio::test]
async fn test_retrigger_while_running_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let mut expedition = Expedition::new(MockMap::new(), StateStore::new(dir.path()))
        .await
        .expect("create");

    expedition.begin().expect("begin");
    expedition.advance().await.expect("advance");
    expedition.advance().await.expect("advance");

    assert!(matches!(
        expedition.begin(),
        Err(ExpeditionError::AlreadyRunning)
    ));

    // The rejected trigger started no second sequence; the first run
    // finishes with its nine steps intact.
    let mut total = 2;
    while expedition.advance().await.expect("advance").is_some() {
        total += 1;
    }
    assert_eq!(total, PLAN_LEN);
}

#[tokio::test]
async fn test_completed_run_may_be_started_again() {
    let dir = TempDir::new().expect("temp dir");
    let mut expedition = Expedition::new(MockMap::new(), StateStore::new(dir.path()))
        .await
        .expect("create");

    run_to_end(&mut expedition).await;
    assert_eq!(expedition.history().len(), 5);

    // A second run appends to history and rebuilds the waypoint trail.
    let outcomes = run_to_end(&mut expedition).await;
    assert_eq!(outcomes.len(), PLAN_LEN);
    assert_eq!(expedition.history().len(), 10);
    assert_eq!(expedition.waypoints().len(), PLAN_LEN);
}

#[tokio::test]
async fn test_clear_resets_everything() {
    let dir = TempDir::new().expect("temp dir");
    let store = StateStore::new(dir.path());
    let mut expedition = Expedition::new(MockMap::new(), store.clone())
        .await
        .expect("create");

    expedition.login("Mara").await.expect("login");
    run_to_end(&mut expedition).await;

    expedition.clear().await.expect("clear");

    assert!(expedition.history().is_empty());
    assert!(expedition.waypoints().is_empty());
    assert_eq!(expedition.run_state(), RunState::Idle);
    assert!(!store.exists().await);
    assert_eq!(store.load().await.expect("load"), Default::default());
}

#[tokio::test]
async fn test_history_survives_a_driver_restart() {
    let dir = TempDir::new().expect("temp dir");
    let store = StateStore::new(dir.path());

    {
        let mut expedition = Expedition::new(MockMap::new(), store.clone())
            .await
            .expect("create");
        expedition.login("Mara").await.expect("login");
        run_to_end(&mut expedition).await;
    }

    let restored = Expedition::new(MockMap::new(), store).await.expect("restore");
    assert_eq!(restored.player_name(), "Mara");
    assert_eq!(restored.history().len(), 5);
    // Waypoints are transient and do not survive the restart.
    assert!(restored.waypoints().is_empty());
}
