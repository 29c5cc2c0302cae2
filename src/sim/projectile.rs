//! Projectile factory
//!
//! Every launch gets a fresh id and its own dynamic body. Nothing else is
//! shared between projectiles except the physics world.

use glam::Vec3;
use rapier3d::prelude::*;

use super::physics::{CollisionProfile, PhysicsBody, PhysicsWorld};
use super::pose::Pose;
use crate::consts::{BACKBOARD, BALL, HOOP};
use crate::tuning::Tuning;

/// Unique per launch within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectileId(pub u32);

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Balls bounce off each other and the backboard and report hoop crossings
pub const BALL_PROFILE: CollisionProfile = CollisionProfile {
    category: BALL,
    collides_with: BALL.union(BACKBOARD),
    contacts_with: HOOP,
};

/// Spawn point and launch impulse derived from a pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchPlan {
    pub position: Vec3,
    pub impulse: Vec3,
}

impl LaunchPlan {
    /// `position = origin + forward * spawn_distance`,
    /// `impulse = forward * launch_force + (0, vertical_bias, 0)`
    pub fn new(pose: &Pose, tuning: &Tuning) -> Self {
        Self {
            position: pose.origin + pose.forward * tuning.spawn_distance,
            impulse: pose.forward * tuning.launch_force + crate::up(tuning.vertical_bias),
        }
    }
}

/// A launched ball as tracked by the simulation
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub body: PhysicsBody,
    pub plan: LaunchPlan,
    /// Tick the ball entered the world
    pub launched_at: u64,
}

/// Build the ball, insert it into the world and kick it
pub fn spawn(
    world: &mut PhysicsWorld,
    id: ProjectileId,
    pose: &Pose,
    tuning: &Tuning,
    tick: u64,
) -> Projectile {
    let plan = LaunchPlan::new(pose, tuning);

    let rb = RigidBodyBuilder::dynamic()
        .translation(vector![plan.position.x, plan.position.y, plan.position.z])
        .ccd_enabled(true)
        .user_data(id.0 as u128)
        .build();
    let collider = BALL_PROFILE
        .apply(ColliderBuilder::ball(tuning.ball_radius))
        .mass(tuning.ball_mass)
        .restitution(tuning.ball_restitution)
        .friction(tuning.ball_friction)
        .user_data(id.0 as u128)
        .build();

    let body = world.insert(rb, collider);
    world.apply_impulse(&body, plan.impulse);
    log::debug!("Projectile {id} launched at {:?} with impulse {:?}", plan.position, plan.impulse);

    Projectile {
        id,
        body,
        plan,
        launched_at: tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_straight_ahead_launch() {
        let pose = Pose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let plan = LaunchPlan::new(&pose, &Tuning::default());

        assert_eq!(plan.impulse, Vec3::new(0.0, 3.0, -8.0));
        assert!((plan.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_spawn_inserts_one_body() {
        let tuning = Tuning::default();
        let mut world = PhysicsWorld::new(tuning.gravity, tuning.sim_dt);
        let pose = Pose::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();

        let projectile = spawn(&mut world, ProjectileId(3), &pose, &tuning, 12);

        assert_eq!(world.body_count(), 1);
        assert_eq!(projectile.launched_at, 12);
        assert!((world.position(&projectile.body) - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);
        let groups = world.collision_groups(&projectile.body).unwrap();
        assert_eq!(groups.memberships, BALL);
        assert!(groups.filter.contains(HOOP));
    }

    #[test]
    fn test_spawned_ball_moves_along_impulse() {
        let tuning = Tuning {
            gravity: Vec3::ZERO,
            ..Default::default()
        };
        let mut world = PhysicsWorld::new(tuning.gravity, tuning.sim_dt);
        let pose = Pose::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let projectile = spawn(&mut world, ProjectileId(1), &pose, &tuning, 0);

        let mut events = Vec::new();
        world.step_into(&mut events);
        let vel = world.velocity(&projectile.body);
        assert!(vel.x > 0.0);
        assert!(vel.y > 0.0);
        assert!(vel.z.abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn impulse_matches_formula(
            x in -1.0f32..1.0, y in -1.0f32..1.0, z in -1.0f32..1.0,
            force in 1.0f32..20.0, bias in 0.0f32..10.0,
        ) {
            prop_assume!(Vec3::new(x, y, z).length() > 0.01);
            let pose = Pose::new(Vec3::ZERO, Vec3::new(x, y, z)).unwrap();
            let tuning = Tuning { launch_force: force, vertical_bias: bias, ..Default::default() };
            let plan = LaunchPlan::new(&pose, &tuning);

            let expected = pose.forward * force + Vec3::new(0.0, bias, 0.0);
            prop_assert!((plan.impulse - expected).length() < 1e-4);
            // Horizontal part of the impulse is purely along the aim
            let horizontal = Vec3::new(plan.impulse.x, 0.0, plan.impulse.z);
            let aim = Vec3::new(pose.forward.x, 0.0, pose.forward.z) * force;
            prop_assert!((horizontal - aim).length() < 1e-4);
        }
    }
}
