//! Figures: the moving, collidable actors of the arena
//!
//! A figure is a circle of diameter `size`, stored by the top-left corner of
//! its bounding box. Its heading (`velocity_direction`) is kept separate from
//! the direction its controller asks for (`desired_direction`), so that a
//! dizzy figure keeps drifting the way it was knocked.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::settings::Tuning;

/// Stable handle of a body: its index in arena registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Heading of a freshly spawned figure (straight down)
pub const INITIAL_HEADING: Vec2 = Vec2::new(0.0, 1.0);

/// A player- or AI-controlled figure
///
/// Motion state is owned by the arena: outside the crate a figure is
/// read-only and steered through [`Arena`](super::Arena) methods.
///
/// ```compile_fail
/// use glam::Vec2;
/// use hazard_arena::{Settings, sim::Arena};
///
/// let mut arena = Arena::new(&Settings::default()).unwrap();
/// let id = arena.spawn("Penguin", Vec2::new(500.0, 300.0));
/// arena.body_mut(id).unwrap().speed = 1.0e6;
/// ```
///
/// ```compile_fail
/// use glam::Vec2;
/// use hazard_arena::{Settings, sim::Arena};
///
/// let mut arena = Arena::new(&Settings::default()).unwrap();
/// let id = arena.spawn("Penguin", Vec2::new(500.0, 300.0));
/// let mut copy = arena.body(id).unwrap().clone();
/// copy.dizzy_until = Some(f64::NAN);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub(crate) id: BodyId,
    pub name: String,
    /// Top-left corner of the bounding box
    pub(crate) position: Vec2,
    /// Diameter, shared by all figures of a session
    pub(crate) size: f32,
    /// Current heading, unit length
    pub(crate) velocity_direction: Vec2,
    /// Direction requested by the controller; zero asks to stop
    pub(crate) desired_direction: Vec2,
    /// Always within `[0, boost_speed]`
    pub(crate) speed: f32,
    pub(crate) alive: bool,
    /// Simulation time at which dizziness wears off
    pub(crate) dizzy_until: Option<f64>,
    /// Simulation time of the last integration
    pub(crate) last_update: f64,
}

impl Body {
    pub(crate) fn new(id: BodyId, name: impl Into<String>, size: f32) -> Self {
        Self {
            id,
            name: name.into(),
            position: Vec2::ZERO,
            size,
            velocity_direction: INITIAL_HEADING,
            desired_direction: Vec2::ZERO,
            speed: 0.0,
            alive: true,
            dizzy_until: None,
            last_update: 0.0,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Top-left corner of the bounding box
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn velocity_direction(&self) -> Vec2 {
        self.velocity_direction
    }

    pub fn desired_direction(&self) -> Vec2 {
        self.desired_direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn dizzy_until(&self) -> Option<f64> {
        self.dizzy_until
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Place the figure by its centre and restart its integration clock
    pub(crate) fn set_centre(&mut self, centre: Vec2, now: f64) {
        self.position = centre - Vec2::splat(self.size / 2.0);
        self.last_update = now;
    }

    /// Re-initialize the figure at `centre` as if freshly spawned
    pub(crate) fn respawn(&mut self, centre: Vec2, now: f64) {
        self.velocity_direction = INITIAL_HEADING;
        self.desired_direction = Vec2::ZERO;
        self.speed = 0.0;
        self.alive = true;
        self.dizzy_until = None;
        self.set_centre(centre, now);
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_min_size(self.position, Vec2::splat(self.size))
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn set_desired_direction(&mut self, direction: Vec2) {
        self.desired_direction = direction;
    }

    pub fn is_dizzy(&self, now: f64) -> bool {
        self.dizzy_until.is_some_and(|until| now < until)
    }

    pub(crate) fn make_dizzy(&mut self, now: f64, duration: f64) {
        self.dizzy_until = Some(now + duration);
    }

    /// Jump straight to boost speed. Returns false (and does nothing) while dizzy.
    pub(crate) fn activate_boost(&mut self, now: f64, boost_speed: f32) -> bool {
        if self.is_dizzy(now) {
            return false;
        }
        self.speed = boost_speed;
        true
    }

    /// Apply the controller's request for this step: expire dizziness, turn
    /// toward the desired direction, and ramp speed toward its target.
    pub(crate) fn steer(&mut self, tuning: &Tuning, elapsed: f32, now: f64) {
        if self.dizzy_until.is_some_and(|until| now >= until) {
            self.dizzy_until = None;
        }

        let speed_target = if self.desired_direction == Vec2::ZERO {
            0.0
        } else {
            if self.dizzy_until.is_none() {
                // TODO: turn gradually instead of snapping to the new heading
                if let Some(heading) = self.desired_direction.try_normalize() {
                    self.velocity_direction = heading;
                }
            }
            tuning.normal_speed
        };

        let max_change = tuning.acceleration * elapsed;
        if self.speed < speed_target {
            self.speed = (self.speed + max_change).min(speed_target);
        } else if self.speed > speed_target {
            self.speed = (self.speed - max_change).max(speed_target);
        }
        debug_assert!(self.speed >= 0.0 && self.speed <= tuning.boost_speed);
    }

    /// Number of micro-steps covering `speed * elapsed`, ties rounded to even
    pub fn planned_steps(&self, elapsed: f32, step_length: f32) -> u32 {
        let displacement = self.speed * elapsed / step_length;
        displacement.round_ties_even().max(0.0) as u32
    }
}
