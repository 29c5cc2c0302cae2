//! Static goal geometry
//!
//! The backboard is a triangle mesh so the rim opening stays open; a box or
//! convex hull would plug the hole the ball has to drop through. The hoop
//! itself is a thin sensor disk just under the rim.

use std::path::Path;

use glam::Vec3;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use super::physics::{CollisionProfile, PhysicsBody, PhysicsWorld};
use crate::consts::{BACKBOARD, BALL, HOOP};
use crate::error::{Error, Result};
use crate::tuning::Tuning;

pub const BACKBOARD_PROFILE: CollisionProfile = CollisionProfile {
    category: BACKBOARD,
    collides_with: BALL,
    contacts_with: Group::empty(),
};

/// No collision response, contact reports against balls only
pub const HOOP_PROFILE: CollisionProfile = CollisionProfile {
    category: HOOP,
    collides_with: Group::empty(),
    contacts_with: BALL,
};

/// Built-in board dimensions (half extents)
const BOARD_HALF_WIDTH: f32 = 0.9;
const BOARD_HALF_HEIGHT: f32 = 0.6;
const BOARD_HALF_DEPTH: f32 = 0.03;
/// Rim center relative to the board center
const RIM_CENTER: Vec3 = Vec3::new(0.0, -0.3, 0.3);
const RIM_INNER_RADIUS: f32 = 0.25;
const RIM_OUTER_RADIUS: f32 = 0.28;
const RIM_SEGMENTS: u32 = 24;

/// Triangle mesh asset, stored as JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshAsset {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
}

impl MeshAsset {
    /// Load and validate a mesh from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let mesh: MeshAsset = serde_json::from_str(&json)?;
        mesh.validate()?;
        Ok(mesh)
    }

    /// Rapier panics on empty or out-of-range meshes, so check first
    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(Error::InvalidMesh("mesh has no triangles".into()));
        }
        if let Some(v) = self.vertices.iter().find(|v| v.iter().any(|c| !c.is_finite())) {
            return Err(Error::InvalidMesh(format!("non-finite vertex {v:?}")));
        }
        let count = self.vertices.len() as u32;
        if let Some(tri) = self.indices.iter().find(|tri| tri.iter().any(|&i| i >= count)) {
            return Err(Error::InvalidMesh(format!(
                "triangle {tri:?} indexes past {count} vertices"
            )));
        }
        Ok(())
    }

    /// Board slab plus a flat rim ring in front of it
    pub fn builtin_backboard() -> Self {
        let mut mesh = MeshAsset::default();

        let (w, h, d) = (BOARD_HALF_WIDTH, BOARD_HALF_HEIGHT, BOARD_HALF_DEPTH);
        for z in [-d, d] {
            for y in [-h, h] {
                for x in [-w, w] {
                    mesh.vertices.push([x, y, z]);
                }
            }
        }
        // Corners indexed as x + 2y + 4z
        const BOX_FACES: [[u32; 4]; 6] = [
            [0, 1, 3, 2], // back
            [4, 6, 7, 5], // front
            [0, 4, 5, 1], // bottom
            [2, 3, 7, 6], // top
            [0, 2, 6, 4], // left
            [1, 5, 7, 3], // right
        ];
        for [a, b, c, d] in BOX_FACES {
            mesh.indices.push([a, b, c]);
            mesh.indices.push([a, c, d]);
        }

        let base = mesh.vertices.len() as u32;
        for i in 0..RIM_SEGMENTS {
            let theta = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
            let (sin, cos) = theta.sin_cos();
            for r in [RIM_INNER_RADIUS, RIM_OUTER_RADIUS] {
                let p = RIM_CENTER + Vec3::new(r * cos, 0.0, r * sin);
                mesh.vertices.push(p.to_array());
            }
        }
        for i in 0..RIM_SEGMENTS {
            let inner = base + 2 * i;
            let outer = inner + 1;
            let next_inner = base + 2 * ((i + 1) % RIM_SEGMENTS);
            let next_outer = next_inner + 1;
            mesh.indices.push([inner, outer, next_outer]);
            mesh.indices.push([inner, next_outer, next_inner]);
        }

        mesh
    }

    fn points(&self) -> Vec<Point<Real>> {
        self.vertices.iter().map(|&[x, y, z]| point![x, y, z]).collect()
    }
}

/// The static volumes registered once per session
#[derive(Debug, Clone)]
pub struct GoalGeometry {
    /// Missing when the mesh asset failed to load
    pub backboard: Option<PhysicsBody>,
    pub hoop: PhysicsBody,
}

impl GoalGeometry {
    /// Build both volumes and insert them into the world.
    ///
    /// A broken backboard asset is logged and skipped; the hoop sensor is
    /// always created.
    pub fn build(world: &mut PhysicsWorld, tuning: &Tuning) -> Self {
        let mesh = match &tuning.backboard_mesh {
            Some(path) => match MeshAsset::load(path) {
                Ok(mesh) => Some(mesh),
                Err(e) => {
                    log::error!("Backboard mesh {} unusable, playing without it: {e}", path.display());
                    None
                }
            },
            None => Some(MeshAsset::builtin_backboard()),
        };
        let backboard = mesh.map(|mesh| insert_backboard(world, &mesh, tuning.backboard_offset));
        let hoop = insert_hoop(world, tuning);

        log::info!(
            "Goal built: backboard {}, hoop at {:?}",
            if backboard.is_some() { "present" } else { "missing" },
            tuning.hoop_offset
        );
        Self { backboard, hoop }
    }
}

fn insert_backboard(world: &mut PhysicsWorld, mesh: &MeshAsset, offset: Vec3) -> PhysicsBody {
    let rb = RigidBodyBuilder::fixed()
        .translation(vector![offset.x, offset.y, offset.z])
        .build();
    let collider = BACKBOARD_PROFILE
        .apply(ColliderBuilder::trimesh(mesh.points(), mesh.indices.clone()))
        .build();
    world.insert(rb, collider)
}

fn insert_hoop(world: &mut PhysicsWorld, tuning: &Tuning) -> PhysicsBody {
    let offset = tuning.hoop_offset;
    let rb = RigidBodyBuilder::fixed()
        .translation(vector![offset.x, offset.y, offset.z])
        .build();
    let collider = HOOP_PROFILE
        .apply(ColliderBuilder::cylinder(tuning.hoop_thickness / 2.0, tuning.hoop_radius))
        .build();
    world.insert(rb, collider)
}
