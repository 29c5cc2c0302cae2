//! Hoop Shot demo entry point
//!
//! Runs a scripted shooter against the default goal: a fixed camera with a
//! little seeded aim jitter per shot, labels printed to the terminal and the
//! high score kept in a JSON file next to the binary's working directory.
//!
//! Usage: `hoop-shot [tuning.json] [shots]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::{Mat4, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hoop_shot::persistence::JsonFileStore;
    use hoop_shot::platform::TerminalScoreBoard;
    use hoop_shot::{Game, Tuning};

    const SAVE_FILE: &str = "hoop-shot-save.json";
    const FRAME_DT: f32 = 1.0 / 60.0;
    const SHOT_INTERVAL_SECS: f32 = 1.5;
    const DEFAULT_SHOTS: u32 = 10;
    /// Slightly downward aim drops the ball through the default rim
    const BASE_PITCH: f32 = -0.09;
    const JITTER: f32 = 0.03;
    /// The session origin is the camera's starting point
    const HEAD_HEIGHT: f32 = 0.0;

    /// Camera held still at the session origin, aim wobbling around the hoop
    struct Shooter {
        rng: Pcg32,
    }

    impl Shooter {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        fn next_aim(&mut self) -> Mat4 {
            let yaw = self.rng.random_range(-JITTER..JITTER);
            let pitch = BASE_PITCH + self.rng.random_range(-JITTER..JITTER);
            Mat4::from_translation(Vec3::new(0.0, HEAD_HEIGHT, 0.0))
                * Mat4::from_rotation_y(yaw)
                * Mat4::from_rotation_x(pitch)
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => match Tuning::load(&path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::warn!("Ignoring tuning file {path}: {e}");
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        };
        let shots = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SHOTS);

        let settle = tuning.settle_delay_secs;
        let mut game = Game::start(tuning, Box::new(JsonFileStore::new(SAVE_FILE)), TerminalScoreBoard);
        let mut shooter = Shooter::new(0x5eed);

        let mut fired = 0;
        let mut next_shot = 0.0;
        let mut elapsed = 0.0;
        let end = shots as f32 * SHOT_INTERVAL_SECS + settle + 0.5;
        while elapsed < end {
            if fired < shots && elapsed >= next_shot {
                let camera = shooter.next_aim();
                if game.launch(&camera) {
                    fired += 1;
                }
                next_shot += SHOT_INTERVAL_SECS;
            }
            game.update(FRAME_DT);
            elapsed += FRAME_DT;
        }

        println!(
            "{fired} shots, {} goals, high score {}",
            game.goal_count(),
            game.high_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `hoop_shot::Game` directly.
}
