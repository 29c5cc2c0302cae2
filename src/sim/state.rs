//! Simulation state
//!
//! Everything mutated inside a simulation step lives here: the physics world,
//! in-flight projectiles, their scoring state and pending checks.

use std::collections::BTreeMap;

use super::contact::ContactRouter;
use super::goal::GoalGeometry;
use super::physics::{ContactEvent, PhysicsWorld};
use super::projectile::{Projectile, ProjectileId};
use super::schedule::DeferredChecks;
use super::scoring::ScoringState;
use crate::tuning::Tuning;

/// Why a projectile left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    BelowFloor,
    OutOfRange,
    Expired,
    Restart,
}

/// Things the driver needs to react to, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Launched { id: ProjectileId },
    ContactObserved { id: ProjectileId },
    GoalScored { id: ProjectileId, goal_count: u32 },
    Missed { id: ProjectileId },
    Despawned { id: ProjectileId, reason: DespawnReason },
}

/// Complete simulation state for one session
pub struct GameState {
    pub tuning: Tuning,
    pub world: PhysicsWorld,
    pub goal: GoalGeometry,
    pub router: ContactRouter,
    pub scoring: ScoringState,
    pub checks: DeferredChecks,
    /// In-flight projectiles (sorted by id)
    pub projectiles: BTreeMap<ProjectileId, Projectile>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the ticks since the last drain
    pub events: Vec<GameEvent>,
    /// Reused buffer for contacts coming out of the physics step
    pub(crate) contact_buf: Vec<ContactEvent>,
    next_id: u32,
}

impl GameState {
    /// Build the world and register the static goal volumes
    pub fn new(tuning: Tuning) -> Self {
        let mut world = PhysicsWorld::new(tuning.gravity, tuning.sim_dt);
        let goal = GoalGeometry::build(&mut world, &tuning);
        let router = ContactRouter::new(tuning.scoring_phase);

        Self {
            tuning,
            world,
            goal,
            router,
            scoring: ScoringState::new(),
            checks: DeferredChecks::new(),
            projectiles: BTreeMap::new(),
            time_ticks: 0,
            events: Vec::new(),
            contact_buf: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new projectile id
    pub fn next_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Seconds of simulated time
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * self.tuning.sim_dt
    }

    pub fn goal_count(&self) -> u32 {
        self.scoring.goal_count()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove one projectile from the world and settle its scoring entry
    pub(crate) fn despawn(&mut self, id: ProjectileId, reason: DespawnReason) {
        let Some(projectile) = self.projectiles.remove(&id) else {
            return;
        };
        self.world.remove(&projectile.body);
        if self.scoring.depart(id) == super::scoring::Departure::Cancelled {
            self.checks.cancel(id);
        }
        log::debug!("Projectile {id} despawned ({reason:?})");
        self.events.push(GameEvent::Despawned { id, reason });
    }

    /// Start a fresh round: clear projectiles and score, keep the goal
    pub fn restart(&mut self) {
        let ids: Vec<_> = self.projectiles.keys().copied().collect();
        for id in ids {
            self.despawn(id, DespawnReason::Restart);
        }
        self.scoring.reset();
        self.checks.clear();
        log::info!("Session restarted");
    }
}
