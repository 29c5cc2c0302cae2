//! Contact event routing
//!
//! Only a ball crossing the hoop matters for scoring. Everything else the
//! physics engine reports (backboard bounces, ball-on-ball) is dropped here.

use std::collections::VecDeque;

use super::physics::{BodyTag, ContactEvent, ContactPhase};
use super::projectile::ProjectileId;
use crate::consts::{BALL, HOOP};

/// Filters tagged contacts down to possible goals
#[derive(Debug, Clone)]
pub struct ContactRouter {
    trigger: ContactPhase,
    inbox: VecDeque<ContactEvent>,
}

impl ContactRouter {
    /// `trigger` is the edge that counts; end-of-contact is the safer choice
    /// because a ball resting on the rim never separates.
    pub fn new(trigger: ContactPhase) -> Self {
        Self {
            trigger,
            inbox: VecDeque::new(),
        }
    }

    pub fn trigger(&self) -> ContactPhase {
        self.trigger
    }

    /// Queue events from the physics step
    pub fn push(&mut self, events: impl IntoIterator<Item = ContactEvent>) {
        self.inbox.extend(events);
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Drain the inbox, yielding the projectile of each qualifying event in
    /// arrival order
    pub fn drain_goals(&mut self) -> Vec<ProjectileId> {
        let trigger = self.trigger;
        self.inbox
            .drain(..)
            .filter(|event| event.phase == trigger)
            .filter_map(|event| ball_through_hoop(&event))
            .collect()
    }
}

/// Exactly one side is a ball and the other is the hoop
pub fn ball_through_hoop(event: &ContactEvent) -> Option<ProjectileId> {
    let is_ball = |tag: &BodyTag| tag.category == BALL;
    let is_hoop = |tag: &BodyTag| tag.category == HOOP;

    if is_ball(&event.a) && is_hoop(&event.b) {
        event.a.projectile
    } else if is_hoop(&event.a) && is_ball(&event.b) {
        event.b.projectile
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BACKBOARD;

    fn event(a: BodyTag, b: BodyTag, phase: ContactPhase) -> ContactEvent {
        ContactEvent { a, b, phase }
    }

    #[test]
    fn test_ball_hoop_either_order() {
        let ball = BodyTag::ball(ProjectileId(4));
        let hoop = BodyTag::fixed(HOOP);
        assert_eq!(
            ball_through_hoop(&event(ball, hoop, ContactPhase::End)),
            Some(ProjectileId(4))
        );
        assert_eq!(
            ball_through_hoop(&event(hoop, ball, ContactPhase::End)),
            Some(ProjectileId(4))
        );
    }

    #[test]
    fn test_ignores_other_pairs() {
        let ball = BodyTag::ball(ProjectileId(1));
        let other = BodyTag::ball(ProjectileId(2));
        let board = BodyTag::fixed(BACKBOARD);
        let hoop = BodyTag::fixed(HOOP);

        assert_eq!(ball_through_hoop(&event(ball, board, ContactPhase::End)), None);
        assert_eq!(ball_through_hoop(&event(ball, other, ContactPhase::End)), None);
        assert_eq!(ball_through_hoop(&event(hoop, board, ContactPhase::End)), None);
    }

    #[test]
    fn test_router_filters_by_phase() {
        let ball = BodyTag::ball(ProjectileId(9));
        let hoop = BodyTag::fixed(HOOP);
        let mut router = ContactRouter::new(ContactPhase::End);

        router.push([
            event(ball, hoop, ContactPhase::Begin),
            event(ball, BodyTag::fixed(BACKBOARD), ContactPhase::End),
            event(hoop, ball, ContactPhase::End),
        ]);
        assert_eq!(router.pending(), 3);
        assert_eq!(router.drain_goals(), vec![ProjectileId(9)]);
        assert_eq!(router.pending(), 0);
        assert!(router.drain_goals().is_empty());
    }

    #[test]
    fn test_begin_trigger() {
        let ball = BodyTag::ball(ProjectileId(2));
        let hoop = BodyTag::fixed(HOOP);
        let mut router = ContactRouter::new(ContactPhase::Begin);
        assert_eq!(router.trigger(), ContactPhase::Begin);

        router.push([
            event(ball, hoop, ContactPhase::Begin),
            event(ball, hoop, ContactPhase::End),
        ]);
        assert_eq!(router.drain_goals(), vec![ProjectileId(2)]);
    }
}
