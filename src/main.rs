//! Hazard Arena headless demo
//!
//! Runs one session without rendering: a randomly steered player against a
//! chasing bot, until one of them dies or the time runs out.
//!
//! Usage: `hazard-arena [seed] [settings.json]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use hazard_arena::consts::SIM_DT;
use hazard_arena::sim::{Arena, ArenaEvent, BodyId, Chaser};
use hazard_arena::{SimError, Settings};

/// Session length cap (seconds of simulated time)
const MAX_SESSION_SECS: f64 = 60.0;
/// Chance per tick that the player picks a new direction
const TURN_CHANCE: f64 = 0.05;
/// Chance per tick that the player presses boost
const BOOST_CHANCE: f64 = 0.01;

/// Stand-in for the touch/keyboard controller
struct RandomPilot {
    body: BodyId,
    rng: Pcg32,
}

impl RandomPilot {
    fn update(&mut self, arena: &mut Arena) {
        if self.rng.random_bool(TURN_CHANCE) {
            let angle = self.rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
            // Occasionally let go of the stick
            let direction = if self.rng.random_bool(0.1) {
                Vec2::ZERO
            } else {
                Vec2::from_angle(angle)
            };
            arena.set_desired_direction(self.body, direction);
        }
        if self.rng.random_bool(BOOST_CHANCE) && arena.activate_boost(self.body) {
            log::debug!("player boost");
        }
    }
}

fn load_settings(path: Option<&str>) -> Result<Settings, SimError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Ok(Settings::default()),
    }
}

fn run(seed: u64, settings: &Settings) -> Result<(), SimError> {
    let mut arena = Arena::new(settings)?;
    let extent = arena.layout().extent();

    let player = arena.spawn("Penguin", Vec2::new(100.0, 100.0));
    let bot = arena.spawn("Bot", extent - Vec2::new(100.0, 100.0));

    let mut pilot = RandomPilot {
        body: player,
        rng: Pcg32::seed_from_u64(seed),
    };
    let mut chaser = Chaser::new(bot, vec![player]);

    let (mut bounces, mut hits) = (0u32, 0u32);
    while arena.clock() < MAX_SESSION_SECS && arena.alive_count() == 2 {
        arena.tick(SIM_DT);
        for event in arena.drain_events() {
            match event {
                ArenaEvent::Died { body, side, at } => {
                    log::info!("{:?} died on the {:?} wall at {}", body, side, at);
                }
                ArenaEvent::Bounced { .. } => bounces += 1,
                ArenaEvent::Collided { .. } => hits += 1,
            }
        }
        pilot.update(&mut arena);
        chaser.update(&mut arena);
    }

    let survivors: Vec<&str> = arena
        .bodies()
        .iter()
        .filter(|b| b.is_alive())
        .map(|b| b.name.as_str())
        .collect();
    println!(
        "seed {seed}: {:.2}s simulated, {bounces} wall bounces, {hits} player hits, survivors: {:?}",
        arena.clock(),
        survivors
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2019);
    let settings_path = args.next();

    let result = load_settings(settings_path.as_deref()).and_then(|settings| run(seed, &settings));
    if let Err(err) = result {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
