//! Cancellable deferred goal checks
//!
//! One pending check per projectile, due at a fixed tick. Checks fire in due
//! order, ties broken by projectile id so runs are reproducible.

use std::collections::{BTreeMap, BTreeSet};

use super::projectile::ProjectileId;

/// A timed task bound to one projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeferredCheck {
    pub due_tick: u64,
    pub projectile: ProjectileId,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredChecks {
    queue: BTreeSet<DeferredCheck>,
    by_projectile: BTreeMap<ProjectileId, u64>,
}

impl DeferredChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) the check for `projectile`
    pub fn schedule(&mut self, projectile: ProjectileId, due_tick: u64) {
        self.cancel(projectile);
        self.queue.insert(DeferredCheck {
            due_tick,
            projectile,
        });
        self.by_projectile.insert(projectile, due_tick);
    }

    /// Cancel a pending check. Returns whether one was pending.
    pub fn cancel(&mut self, projectile: ProjectileId) -> bool {
        match self.by_projectile.remove(&projectile) {
            Some(due_tick) => self.queue.remove(&DeferredCheck {
                due_tick,
                projectile,
            }),
            None => false,
        }
    }

    pub fn is_scheduled(&self, projectile: ProjectileId) -> bool {
        self.by_projectile.contains_key(&projectile)
    }

    pub fn due_tick(&self, projectile: ProjectileId) -> Option<u64> {
        self.by_projectile.get(&projectile).copied()
    }

    /// Remove and return every check due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Vec<DeferredCheck> {
        let mut due = Vec::new();
        while let Some(&check) = self.queue.first() {
            if check.due_tick > now {
                break;
            }
            self.queue.pop_first();
            self.by_projectile.remove(&check.projectile);
            due.push(check);
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.by_projectile.clear();
    }
}
