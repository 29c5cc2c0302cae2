//! Goal attribution and scoring
//!
//! Each launch carries its own goal state, so a check can only ever consume
//! the contact of the projectile it was scheduled for. Two balls in the air
//! at once never share a pending flag.
//!
//! ```text
//! AwaitingContact --hoop contact--> ContactObserved
//!        |                                |
//!   settle check                     settle check
//!        v                                v
//!  Resolved(missed)                Resolved(scored)   goal_count += 1
//! ```

use std::collections::BTreeMap;

use super::projectile::ProjectileId;

/// Where a single launch is in its scoring cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalState {
    AwaitingContact,
    ContactObserved,
    Resolved { scored: bool },
}

/// Result of running a deferred check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Scored { goal_count: u32 },
    Missed,
    /// Already resolved or never registered
    Ignored,
}

/// Result of a projectile leaving the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// Entry dropped; its pending check must be cancelled
    Cancelled,
    /// Contact already seen; the check still decides the goal
    AwaitingCheck,
    /// Nothing left to do
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    state: GoalState,
    in_world: bool,
}

/// Session scoring state
#[derive(Debug, Clone, Default)]
pub struct ScoringState {
    goal_count: u32,
    entries: BTreeMap<ProjectileId, Entry>,
}

impl ScoringState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal_count(&self) -> u32 {
        self.goal_count
    }

    pub fn state(&self, id: ProjectileId) -> Option<GoalState> {
        self.entries.get(&id).map(|e| e.state)
    }

    /// Number of launches still tracked
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    /// Start tracking a new launch
    pub fn register_launch(&mut self, id: ProjectileId) {
        self.entries.insert(
            id,
            Entry {
                state: GoalState::AwaitingContact,
                in_world: true,
            },
        );
    }

    /// A hoop contact for `id`. Returns true on the first contact only;
    /// duplicates and contacts for unknown or resolved launches are ignored.
    pub fn observe_contact(&mut self, id: ProjectileId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.state == GoalState::AwaitingContact => {
                entry.state = GoalState::ContactObserved;
                log::debug!("Projectile {id} crossed the hoop");
                true
            }
            _ => false,
        }
    }

    /// The settle-delay check for `id`. Safe to call any number of times.
    pub fn resolve(&mut self, id: ProjectileId) -> CheckOutcome {
        let Some(entry) = self.entries.get_mut(&id) else {
            return CheckOutcome::Ignored;
        };
        let outcome = match entry.state {
            GoalState::Resolved { .. } => return CheckOutcome::Ignored,
            GoalState::ContactObserved => {
                self.goal_count += 1;
                entry.state = GoalState::Resolved { scored: true };
                CheckOutcome::Scored {
                    goal_count: self.goal_count,
                }
            }
            GoalState::AwaitingContact => {
                entry.state = GoalState::Resolved { scored: false };
                CheckOutcome::Missed
            }
        };
        if !entry.in_world {
            self.entries.remove(&id);
        }
        outcome
    }

    /// The projectile was removed from the physics world
    pub fn depart(&mut self, id: ProjectileId) -> Departure {
        let Some(entry) = self.entries.get_mut(&id) else {
            return Departure::Finished;
        };
        let state = entry.state;
        match state {
            GoalState::AwaitingContact => {
                self.entries.remove(&id);
                Departure::Cancelled
            }
            GoalState::ContactObserved => {
                entry.in_world = false;
                Departure::AwaitingCheck
            }
            GoalState::Resolved { .. } => {
                self.entries.remove(&id);
                Departure::Finished
            }
        }
    }

    /// Session restart
    pub fn reset(&mut self) {
        self.goal_count = 0;
        self.entries.clear();
    }
}
