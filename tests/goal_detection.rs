//! End-to-end goal detection with real physics
//!
//! The hoop here is a fat sensor parked right in the flight path of a
//! straight-ahead launch, and the backboard asset is deliberately missing,
//! so the only thing that can score is the ball actually crossing the hoop.

use glam::{Mat4, Vec3};

use hoop_shot::persistence::JsonFileStore;
use hoop_shot::platform::LabelBuffer;
use hoop_shot::sim::{DespawnReason, GameEvent, GameState, GoalState, Pose, ProjectileId, TickInput, tick};
use hoop_shot::{Game, Tuning};

fn range_tuning() -> Tuning {
    Tuning {
        backboard_mesh: Some("/missing/backboard.json".into()),
        hoop_offset: Vec3::new(0.0, 0.0, -3.0),
        hoop_radius: 1.0,
        hoop_thickness: 2.0,
        ..Default::default()
    }
}

fn forward() -> Pose {
    Pose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap()
}

fn backward() -> Pose {
    Pose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)).unwrap()
}

fn launch(state: &mut GameState, pose: Pose) {
    tick(
        state,
        &TickInput {
            launches: vec![pose],
            ..Default::default()
        },
    );
}

fn run_until(state: &mut GameState, tick_no: u64, events: &mut Vec<GameEvent>) {
    while state.time_ticks < tick_no {
        tick(state, &TickInput::default());
        events.extend(state.drain_events());
    }
}

#[test]
fn straight_shot_through_hoop_scores_after_settle_delay() {
    let mut state = GameState::new(range_tuning());
    assert!(state.goal.backboard.is_none());

    launch(&mut state, forward());
    let a = ProjectileId(1);
    let mut events = state.drain_events();

    // Through the sensor well within half a second
    run_until(&mut state, 150, &mut events);
    assert_eq!(state.scoring.state(a), Some(GoalState::ContactObserved));
    assert!(events.contains(&GameEvent::ContactObserved { id: a }));
    assert_eq!(state.goal_count(), 0);

    run_until(&mut state, 900, &mut events);
    assert_eq!(state.goal_count(), 0);
    run_until(&mut state, 901, &mut events);
    assert_eq!(state.goal_count(), 1);

    // The ball fell out of the world before its check and still counted
    let despawned = events
        .iter()
        .position(|e| matches!(e, GameEvent::Despawned { id, reason: DespawnReason::BelowFloor } if *id == a))
        .expect("ball should fall below the floor");
    let scored = events
        .iter()
        .position(|e| *e == GameEvent::GoalScored { id: a, goal_count: 1 })
        .expect("goal event");
    assert!(despawned < scored);
    assert_eq!(state.scoring.tracked(), 0);
}

#[test]
fn overlapping_launch_that_misses_does_not_score() {
    // Keep both balls in the world until B's check so B is judged, not dropped
    let tuning = Tuning {
        despawn_floor: -1000.0,
        despawn_radius: 1000.0,
        projectile_lifetime_secs: 20.0,
        ..range_tuning()
    };
    let mut state = GameState::new(tuning);
    let (a, b) = (ProjectileId(1), ProjectileId(2));
    let mut events = Vec::new();

    launch(&mut state, forward()); // t = 0
    run_until(&mut state, 300, &mut events);
    launch(&mut state, backward()); // t = 1.0
    assert_eq!(state.checks.due_tick(b), Some(1201));

    run_until(&mut state, 901, &mut events); // A's check at t = 3.0
    assert_eq!(state.goal_count(), 1);
    assert!(events.contains(&GameEvent::GoalScored { id: a, goal_count: 1 }));
    assert_eq!(state.scoring.state(b), Some(GoalState::AwaitingContact));

    run_until(&mut state, 1200, &mut events);
    assert!(state.checks.is_scheduled(b));
    run_until(&mut state, 1201, &mut events); // B's check at t = 4.0
    assert_eq!(state.goal_count(), 1);
    assert!(events.contains(&GameEvent::Missed { id: b }));
    assert!(!events.contains(&GameEvent::ContactObserved { id: b }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Despawned { .. })));
}

#[test]
fn high_score_survives_into_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let save = dir.path().join("save.json");
    let camera = Mat4::IDENTITY;

    let mut game = Game::start(range_tuning(), Box::new(JsonFileStore::new(&save)), LabelBuffer::default());
    assert_eq!(game.board().high_score, "0");

    assert!(game.launch(&camera));
    for _ in 0..200 {
        game.update(1.0 / 60.0);
    }
    assert_eq!(game.goal_count(), 1);
    assert_eq!(game.board().score, "1");
    assert_eq!(game.board().high_score, "1");

    let next = Game::start(range_tuning(), Box::new(JsonFileStore::new(&save)), LabelBuffer::default());
    assert_eq!(next.goal_count(), 0);
    assert_eq!(next.high_score(), 1);
    assert_eq!(next.board().high_score, "1");
}
