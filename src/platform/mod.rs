//! Platform abstraction layer
//!
//! The host supplies two things the simulation cannot produce itself:
//! - Camera pose from world tracking
//! - A label surface for the score and high score

use glam::Mat4;

/// World tracking provider. Returns the current camera-to-world transform,
/// or `None` while tracking is not established.
pub trait PoseSource {
    fn camera_transform(&self) -> Option<Mat4>;
}

/// A fixed transform, handy for tests and tripod-style setups
impl PoseSource for Mat4 {
    fn camera_transform(&self) -> Option<Mat4> {
        Some(*self)
    }
}

impl<T: PoseSource + ?Sized> PoseSource for &T {
    fn camera_transform(&self) -> Option<Mat4> {
        (**self).camera_transform()
    }
}

/// Tracking that never comes up
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracking;

impl PoseSource for NoTracking {
    fn camera_transform(&self) -> Option<Mat4> {
        None
    }
}

/// Text surface for the two score labels
pub trait ScoreBoard {
    fn set_score(&mut self, text: &str);
    fn set_high_score(&mut self, text: &str);
}

/// Prints label changes to stdout
#[derive(Debug, Default)]
pub struct TerminalScoreBoard;

impl ScoreBoard for TerminalScoreBoard {
    fn set_score(&mut self, text: &str) {
        println!("Score: {text}");
    }

    fn set_high_score(&mut self, text: &str) {
        println!("High score: {text}");
    }
}

/// Keeps the latest label text (headless hosts and tests)
#[derive(Debug, Clone, Default)]
pub struct LabelBuffer {
    pub score: String,
    pub high_score: String,
    /// Number of label pushes, both labels combined
    pub updates: usize,
}

impl ScoreBoard for LabelBuffer {
    fn set_score(&mut self, text: &str) {
        self.score = text.to_string();
        self.updates += 1;
    }

    fn set_high_score(&mut self, text: &str) {
        self.high_score = text.to_string();
        self.updates += 1;
    }
}
