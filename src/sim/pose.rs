//! Launch pose sampling
//!
//! The camera looks down its negative local z-axis, so the aim direction is
//! the negated third basis column of the camera transform.

use glam::{Mat4, Vec3};

/// Where a launch starts and which way it points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub origin: Vec3,
    /// Unit aim direction
    pub forward: Vec3,
}

impl Pose {
    /// Build a pose from an origin and any non-zero direction
    pub fn new(origin: Vec3, forward: Vec3) -> Option<Self> {
        let forward = forward.try_normalize()?;
        origin.is_finite().then_some(Self { origin, forward })
    }

    /// Sample a pose from a camera-to-world transform.
    ///
    /// Returns `None` for a degenerate transform (zero look axis or NaNs),
    /// which callers treat the same as "no tracking".
    pub fn from_transform(transform: &Mat4) -> Option<Self> {
        let origin = transform.w_axis.truncate();
        let forward = -transform.z_axis.truncate();
        Self::new(origin, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_looks_down_negative_z() {
        let pose = Pose::from_transform(&Mat4::IDENTITY).unwrap();
        assert_eq!(pose.origin, Vec3::ZERO);
        assert_eq!(pose.forward, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_translation_and_rotation() {
        // Camera at (1, 2, 3) turned 90 degrees left (looking down -x)
        let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let pose = Pose::from_transform(&transform).unwrap();

        assert!((pose.origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((pose.forward - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_forward_is_normalized() {
        let transform = Mat4::from_scale(Vec3::splat(4.0));
        let pose = Pose::from_transform(&transform).unwrap();
        assert!((pose.forward.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_transform() {
        assert!(Pose::from_transform(&Mat4::ZERO).is_none());
        assert!(Pose::new(Vec3::NAN, Vec3::Z).is_none());
    }
}
