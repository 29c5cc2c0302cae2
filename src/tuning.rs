//! Data-driven tuning
//!
//! Placement and launch constants were tuned by hand against a real room, so
//! they live here instead of in code. Partial JSON files are fine: anything
//! missing falls back to the default.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::ContactPhase;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Simulation ===
    /// Physics step in seconds
    pub sim_dt: f32,
    /// Substep cap per rendered frame
    pub max_substeps: u32,
    pub gravity: Vec3,

    // === Launch ===
    pub launch_force: f32,
    pub vertical_bias: f32,
    /// Distance in front of the camera where the ball spawns
    pub spawn_distance: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,

    // === Scoring ===
    /// Delay from launch to that launch's goal check
    pub settle_delay_secs: f32,
    /// Which contact edge against the hoop counts as a possible goal
    pub scoring_phase: ContactPhase,
    /// Ignore hoop contacts from balls moving upward (shots from under the rim)
    pub downward_only: bool,

    // === Goal placement (relative to the session origin) ===
    pub backboard_offset: Vec3,
    /// JSON mesh asset; `None` uses the built-in board and rim
    pub backboard_mesh: Option<PathBuf>,
    pub hoop_offset: Vec3,
    pub hoop_radius: f32,
    pub hoop_thickness: f32,

    // === Cleanup ===
    /// Balls below this height are removed
    pub despawn_floor: f32,
    /// Balls further than this from the origin are removed
    pub despawn_radius: f32,
    /// Balls older than this are removed
    pub projectile_lifetime_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            gravity: Vec3::new(0.0, -9.8, 0.0),

            launch_force: LAUNCH_FORCE,
            vertical_bias: VERTICAL_BIAS,
            spawn_distance: 1.0,
            ball_radius: 0.15,
            ball_mass: 1.0,
            ball_restitution: 0.6,
            ball_friction: 0.5,

            settle_delay_secs: SETTLE_DELAY_SECS,
            scoring_phase: ContactPhase::End,
            downward_only: false,

            backboard_offset: Vec3::new(0.0, 0.5, -4.0),
            backboard_mesh: None,
            hoop_offset: Vec3::new(0.0, 0.15, -3.7),
            hoop_radius: 0.23,
            hoop_thickness: 0.02,

            despawn_floor: -20.0,
            despawn_radius: 60.0,
            projectile_lifetime_secs: 10.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("sim_dt", self.sim_dt),
            ("settle_delay_secs", self.settle_delay_secs),
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("hoop_radius", self.hoop_radius),
            ("hoop_thickness", self.hoop_thickness),
            ("projectile_lifetime_secs", self.projectile_lifetime_secs),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidTuning(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_substeps == 0 {
            return Err(Error::InvalidTuning("max_substeps must be at least 1".into()));
        }
        Ok(())
    }

    /// Settle delay in simulation ticks
    pub fn settle_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.settle_delay_secs, self.sim_dt)
    }

    /// Projectile lifetime in simulation ticks
    pub fn lifetime_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.projectile_lifetime_secs, self.sim_dt)
    }
}
