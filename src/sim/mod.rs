//! Simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by projectile id)
//! - No rendering or platform dependencies

pub mod contact;
pub mod goal;
pub mod physics;
pub mod pose;
pub mod projectile;
pub mod schedule;
pub mod scoring;
pub mod state;
pub mod tick;

pub use contact::{ContactRouter, ball_through_hoop};
pub use goal::{BACKBOARD_PROFILE, GoalGeometry, HOOP_PROFILE, MeshAsset};
pub use physics::{BodyTag, CollisionProfile, ContactEvent, ContactPhase, PhysicsBody, PhysicsWorld};
pub use pose::Pose;
pub use projectile::{BALL_PROFILE, LaunchPlan, Projectile, ProjectileId};
pub use schedule::{DeferredCheck, DeferredChecks};
pub use scoring::{CheckOutcome, Departure, GoalState, ScoringState};
pub use state::{DespawnReason, GameEvent, GameState};
pub use tick::{TickInput, tick};
