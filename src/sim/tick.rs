//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: launches enter the world, physics steps,
//! hoop contacts update scoring, stray balls are removed, and only then do
//! due checks run. A contact and a check in the same tick therefore always
//! see the contact first.

use super::physics::ContactEvent;
use super::pose::Pose;
use super::projectile;
use super::scoring::CheckOutcome;
use super::state::{DespawnReason, GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One entry per launch action since the last tick
    pub launches: Vec<Pose>,
    /// Start a fresh round
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Launches
    let settle_ticks = state.tuning.settle_ticks();
    for pose in &input.launches {
        let id = state.next_projectile_id();
        let ball = projectile::spawn(&mut state.world, id, pose, &state.tuning, now);
        state.projectiles.insert(id, ball);
        state.scoring.register_launch(id);
        state.checks.schedule(id, now + settle_ticks);
        state.events.push(GameEvent::Launched { id });
    }

    // Physics
    let mut contacts: Vec<ContactEvent> = std::mem::take(&mut state.contact_buf);
    state.world.step_into(&mut contacts);
    state.router.push(contacts.drain(..));
    state.contact_buf = contacts;

    // Hoop contacts
    for id in state.router.drain_goals() {
        if state.tuning.downward_only && !falling(state, id) {
            log::debug!("Projectile {id} crossed the hoop going up, ignored");
            continue;
        }
        if state.scoring.observe_contact(id) {
            state.events.push(GameEvent::ContactObserved { id });
        }
    }

    // Cleanup
    for (id, reason) in stray_projectiles(state) {
        state.despawn(id, reason);
    }

    // Deferred checks
    for check in state.checks.pop_due(now) {
        let id = check.projectile;
        match state.scoring.resolve(id) {
            CheckOutcome::Scored { goal_count } => {
                log::info!("Goal by projectile {id}, score {goal_count}");
                state.events.push(GameEvent::GoalScored { id, goal_count });
            }
            CheckOutcome::Missed => {
                log::debug!("Projectile {id} missed");
                state.events.push(GameEvent::Missed { id });
            }
            CheckOutcome::Ignored => {}
        }
    }
}

/// Whether a projectile is moving down. Unknown ids pass; scoring drops them.
fn falling(state: &GameState, id: super::ProjectileId) -> bool {
    state
        .projectiles
        .get(&id)
        .is_none_or(|p| state.world.velocity(&p.body).y < 0.0)
}

/// Projectiles that fell, flew away, or outlived their lifetime
fn stray_projectiles(state: &GameState) -> Vec<(super::ProjectileId, DespawnReason)> {
    let tuning = &state.tuning;
    let lifetime = tuning.lifetime_ticks();
    state
        .projectiles
        .values()
        .filter_map(|p| {
            let pos = state.world.position(&p.body);
            let reason = if pos.y < tuning.despawn_floor {
                DespawnReason::BelowFloor
            } else if pos.length() > tuning.despawn_radius {
                DespawnReason::OutOfRange
            } else if state.time_ticks - p.launched_at >= lifetime {
                DespawnReason::Expired
            } else {
                return None;
            };
            Some((p.id, reason))
        })
        .collect()
}
