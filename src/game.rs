//! Game driver
//!
//! Bridges the host and the simulation: samples the tracking pose on launch,
//! runs fixed ticks from variable frame times, and turns simulation events
//! into label updates and high score writes.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{PoseSource, ScoreBoard};
use crate::sim::{GameEvent, GameState, Pose, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game<B: ScoreBoard> {
    pub state: GameState,
    high_score: HighScore,
    board: B,
    /// Inputs collected since the last tick
    input: TickInput,
    accumulator: f32,
}

impl<B: ScoreBoard> Game<B> {
    /// Session start: build the goal, load the high score, show both labels
    pub fn start(tuning: Tuning, store: Box<dyn KeyValueStore>, mut board: B) -> Self {
        let state = GameState::new(tuning);
        let high_score = HighScore::load(store);

        board.set_score("0");
        board.set_high_score(&high_score.value().to_string());
        log::info!("Session started, high score {}", high_score.value());

        Self {
            state,
            high_score,
            board,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Launch action. Skipped silently while tracking has no pose.
    /// The ball enters the world on the next tick.
    pub fn launch(&mut self, tracking: &dyn PoseSource) -> bool {
        let Some(pose) = tracking.camera_transform().and_then(|t| Pose::from_transform(&t)) else {
            log::debug!("Launch skipped: no tracking pose");
            return false;
        };
        self.input.launches.push(pose);
        true
    }

    /// Start a fresh round on the next tick
    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = self.state.tuning.sim_dt;
        let max_substeps = self.state.tuning.max_substeps;

        self.accumulator += frame_dt.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= dt && substeps < max_substeps {
            self.step();
            self.accumulator -= dt;
            substeps += 1;
        }
        // Drop whatever the cap left behind to prevent spiral of death
        if substeps == max_substeps {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Run exactly one tick
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);
        if input.restart {
            self.board.set_score("0");
        }
        for event in self.state.drain_events() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        if let GameEvent::GoalScored { goal_count, .. } = event {
            self.board.set_score(&goal_count.to_string());
            if self.high_score.submit(goal_count) {
                let value = self.high_score.value();
                log::info!("High score now {value}");
                self.board.set_high_score(&value.to_string());
            }
        }
    }

    pub fn goal_count(&self) -> u32 {
        self.state.goal_count()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    pub fn board(&self) -> &B {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::persistence::MemoryStore;
    use crate::platform::{LabelBuffer, NoTracking};
    use crate::sim::{BodyTag, ContactEvent, ContactPhase, ProjectileId};
    use glam::{Mat4, Vec3};

    fn quiet_tuning() -> Tuning {
        Tuning {
            gravity: Vec3::ZERO,
            launch_force: 0.0,
            vertical_bias: 0.0,
            ..Default::default()
        }
    }

    fn game() -> Game<LabelBuffer> {
        Game::start(quiet_tuning(), Box::new(MemoryStore::new()), LabelBuffer::default())
    }

    fn fake_hoop_exit(game: &mut Game<LabelBuffer>, id: ProjectileId) {
        game.state.router.push([ContactEvent {
            a: BodyTag::fixed(crate::consts::HOOP),
            b: BodyTag::ball(id),
            phase: ContactPhase::End,
        }]);
    }

    #[test]
    fn test_start_shows_zero_labels() {
        let game = game();
        assert_eq!(game.board().score, "0");
        assert_eq!(game.board().high_score, "0");
        assert_eq!(game.board().updates, 2);
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn test_launch_without_tracking_is_noop() {
        let mut game = game();
        assert!(!game.launch(&NoTracking));
        game.step();
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn test_one_projectile_per_launch() {
        let mut game = game();
        let camera = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));
        assert!(game.launch(&camera));
        assert!(game.launch(&camera));
        game.step();
        assert_eq!(game.state.projectiles.len(), 2);
        game.step();
        assert_eq!(game.state.projectiles.len(), 2);
    }

    #[test]
    fn test_goal_updates_labels_and_high_score() {
        let mut game = game();
        game.launch(&Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        game.step();
        fake_hoop_exit(&mut game, ProjectileId(1));

        // A little over three seconds of 60 fps frames
        for _ in 0..200 {
            game.update(1.0 / 60.0);
        }
        assert_eq!(game.goal_count(), 1);
        assert_eq!(game.board().score, "1");
        assert_eq!(game.high_score(), 1);
        assert_eq!(game.board().high_score, "1");
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "5").unwrap();
        let mut game = Game::start(quiet_tuning(), Box::new(store), LabelBuffer::default());
        assert_eq!(game.board().high_score, "5");

        game.launch(&Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        game.step();
        fake_hoop_exit(&mut game, ProjectileId(1));
        for _ in 0..901 {
            game.step();
        }
        assert_eq!(game.board().score, "1");
        assert_eq!(game.high_score(), 5);
        assert_eq!(game.board().high_score, "5");
        // Two labels at start, then only the score label
        assert_eq!(game.board().updates, 3);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut game = game();
        assert_eq!(game.update(1.0), game.state.tuning.max_substeps);
        let before = game.state.time_ticks;
        game.update(0.0);
        assert_eq!(game.state.time_ticks, before);
    }

    #[test]
    fn test_restart_resets_score_label() {
        let mut game = game();
        game.launch(&Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        game.step();
        fake_hoop_exit(&mut game, ProjectileId(1));
        for _ in 0..901 {
            game.step();
        }
        assert_eq!(game.board().score, "1");

        game.restart();
        game.step();
        assert_eq!(game.goal_count(), 0);
        assert_eq!(game.board().score, "0");
        assert_eq!(game.high_score(), 1);
    }
}
