//! Hoop Shot - AR basketball shooting loop
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics world, goal geometry, contact routing, scoring)
//! - `game`: Driver that feeds launches into the sim and reacts to its events
//! - `platform`: Tracking pose and score label collaborators
//! - `persistence`: Key-value storage backends
//! - `highscores`: Persisted high score
//! - `tuning`: Data-driven placement and launch constants

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::Game;
pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec3;

/// Fixed values that are part of the game's contract rather than its tuning
pub mod consts {
    use rapier3d::prelude::Group;

    /// Physics integration step (300 Hz, fine enough for the thin hoop sensor)
    pub const SIM_DT: f32 = 1.0 / 300.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 10;

    /// Launch impulse along the aim direction
    pub const LAUNCH_FORCE: f32 = 8.0;
    /// Upward impulse added to every launch
    pub const VERTICAL_BIAS: f32 = 3.0;
    /// Seconds between a launch and its goal check
    pub const SETTLE_DELAY_SECS: f32 = 3.0;

    /// Collision categories. Distinct powers of two so masks compose.
    pub const HOOP: Group = Group::GROUP_1;
    pub const BALL: Group = Group::GROUP_2;
    pub const BACKBOARD: Group = Group::GROUP_3;

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

/// Convert a seconds duration into whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32, dt: f32) -> u64 {
    ((secs / dt).round() as u64).max(1)
}

/// Vertical component helper: `(0, y, 0)`
#[inline]
pub fn up(y: f32) -> Vec3 {
    Vec3::new(0.0, y, 0.0)
}
