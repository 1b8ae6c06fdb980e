//! Hazard Arena - motion and collision core of an arcade arena game
//!
//! Core modules:
//! - `sim`: Simulation (walls, bodies, collision detection and response)
//! - `settings`: Data-driven tuning and arena layout
//! - `error`: Error type shared by the fallible constructors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{ArenaLayout, Settings, Tuning, WallSpec};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default tick length used by the demo loop (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const WALL_THICKNESS: f32 = 50.0;

    /// Diameter of every figure (bounding box is PLAYER_SIZE x PLAYER_SIZE)
    pub const PLAYER_SIZE: f32 = 50.0;

    /// Cruise speed when a direction is requested (pixels/s)
    pub const NORMAL_SPEED: f32 = 500.0;
    /// Instant speed after a boost (pixels/s)
    pub const BOOST_SPEED: f32 = 1500.0;
    /// Acceleration and braking rate (pixels/s²)
    pub const ACCELERATION: f32 = 600.0;
    /// How long a figure stays dizzy after a bounce (seconds)
    pub const DIZZY_DURATION: f64 = 0.2;

    /// Length of one micro-step (pixels)
    pub const STEP_LENGTH: f32 = 1.0;
    /// Largest elapsed time integrated in one call (seconds)
    pub const MAX_ELAPSED: f64 = 0.25;
}

/// Angle of a vector in radians, measured from +x toward +y
#[inline]
pub fn heading_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Rotate a vector counter-clockwise (in +x toward +y sense) by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
