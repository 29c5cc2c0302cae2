//! Rapier3D wrapper
//!
//! Owns every piece of Rapier state and turns its collision events into
//! category-tagged [`ContactEvent`]s, queued once per step.

use std::sync::Mutex;

use glam::Vec3;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use super::projectile::ProjectileId;
use crate::consts::BALL;

// ---------------------------------------------------------------------------
// Conversion helpers (private) - glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn na_to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Category and masks for one collider.
///
/// `collides_with` drives the solver (physical response); `contacts_with`
/// only raises contact events. A profile with an empty `collides_with` is a
/// sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionProfile {
    pub category: Group,
    pub collides_with: Group,
    pub contacts_with: Group,
}

impl CollisionProfile {
    pub fn is_sensor(&self) -> bool {
        self.collides_with.is_empty()
    }

    /// Pairs that rapier should consider at all (collision or contact)
    pub fn collision_groups(&self) -> InteractionGroups {
        InteractionGroups::new(self.category, self.collides_with | self.contacts_with)
    }

    /// Pairs that get a physical response
    pub fn solver_groups(&self) -> InteractionGroups {
        InteractionGroups::new(self.category, self.collides_with)
    }

    /// Apply groups, sensor flag and event reporting to a collider builder
    pub fn apply(&self, builder: ColliderBuilder) -> ColliderBuilder {
        let events = if self.contacts_with.is_empty() {
            ActiveEvents::empty()
        } else {
            ActiveEvents::COLLISION_EVENTS
        };
        builder
            .collision_groups(self.collision_groups())
            .solver_groups(self.solver_groups())
            .sensor(self.is_sensor())
            .active_events(events)
    }
}

/// Which edge of an overlap an event marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPhase {
    Begin,
    End,
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyTag {
    pub category: Group,
    /// Set for projectiles only
    pub projectile: Option<ProjectileId>,
}

impl BodyTag {
    pub fn fixed(category: Group) -> Self {
        Self {
            category,
            projectile: None,
        }
    }

    pub fn ball(id: ProjectileId) -> Self {
        Self {
            category: BALL,
            projectile: Some(id),
        }
    }
}

/// A contact between two bodies, as delivered to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: BodyTag,
    pub b: BodyTag,
    pub phase: ContactPhase,
}

/// Handle pair referencing Rapier internals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        let mut guard = self.collisions.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact forces are never requested.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier3D boilerplate into a single struct.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a world with the given gravity and integration step
    pub fn new(gravity: Vec3, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Insert a body with a single collider attached
    pub fn insert(&mut self, body: RigidBody, collider: Collider) -> PhysicsBody {
        let body_handle = self.bodies.insert(body);
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and its collider from the simulation
    pub fn remove(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Apply an instantaneous impulse to a body
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec3_to_na(impulse), true);
        }
    }

    /// Step the simulation and append tagged contact events to `events`
    pub fn step_into(&mut self, events: &mut Vec<ContactEvent>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            // A removed collider has no tag left to resolve
            if event.removed() {
                continue;
            }
            let (h1, h2, phase) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, ContactPhase::Begin),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, ContactPhase::End),
            };
            if let (Some(a), Some(b)) = (self.tag_of(h1), self.tag_of(h2)) {
                events.push(ContactEvent { a, b, phase });
            }
        }
    }

    /// Current position of a body (zero if it no longer exists)
    pub fn position(&self, body: &PhysicsBody) -> Vec3 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec3(rb.translation()))
            .unwrap_or(Vec3::ZERO)
    }

    /// Current linear velocity of a body
    pub fn velocity(&self, body: &PhysicsBody) -> Vec3 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec3(rb.linvel()))
            .unwrap_or(Vec3::ZERO)
    }

    /// Collision profile a collider was built with
    pub fn collision_groups(&self, body: &PhysicsBody) -> Option<InteractionGroups> {
        self.colliders
            .get(body.collider_handle)
            .map(|c| c.collision_groups())
    }

    pub fn is_sensor(&self, body: &PhysicsBody) -> bool {
        self.colliders
            .get(body.collider_handle)
            .is_some_and(|c| c.is_sensor())
    }

    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Number of rigid bodies in the simulation
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- private helpers --

    fn tag_of(&self, handle: ColliderHandle) -> Option<BodyTag> {
        let collider = self.colliders.get(handle)?;
        let category = collider.collision_groups().memberships;
        let projectile = category
            .contains(BALL)
            .then(|| ProjectileId(collider.user_data as u32));
        Some(BodyTag {
            category,
            projectile,
        })
    }
}
