//! Motion and collision simulation
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Time is passed in by the caller (simulation seconds)
//! - Figures are updated one after another, in spawn order
//! - Walls are checked in registration order; the first overlap wins

pub mod aabb;
pub mod ai;
pub mod body;
pub mod collision;
pub mod state;
pub mod tick;
pub mod wall;

pub use aabb::Aabb;
pub use ai::Chaser;
pub use body::{Body, BodyId, INITIAL_HEADING};
pub use collision::{CollisionOutcome, CollisionSystem, reflect_off_wall, respond_player_collision};
pub use state::{Arena, ArenaEvent};
pub use wall::{HazardPattern, Side, Wall};
