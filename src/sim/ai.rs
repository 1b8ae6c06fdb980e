//! Bot controller
//!
//! The bot only feeds a desired direction into the core, the same way a
//! joystick does. It chases one living target at a time and stops once
//! every target is dead.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::state::Arena;

/// Steers a figure straight at the first living target
#[derive(Debug, Clone)]
pub struct Chaser {
    pub body: BodyId,
    targets: Vec<BodyId>,
    victim: Option<BodyId>,
}

impl Chaser {
    pub fn new(body: BodyId, targets: Vec<BodyId>) -> Self {
        let victim = targets.first().copied();
        Self {
            body,
            targets,
            victim,
        }
    }

    pub fn victim(&self) -> Option<BodyId> {
        self.victim
    }

    /// Direction toward the current victim, picking a new one if it died
    pub fn desired_direction(&mut self, bodies: &[Body]) -> Vec2 {
        let Some(me) = bodies.get(self.body.0) else {
            return Vec2::ZERO;
        };
        let alive = |id: &BodyId| bodies.get(id.0).is_some_and(|b| b.alive);

        if !self.victim.as_ref().is_some_and(alive) {
            self.victim = self.targets.iter().copied().find(|id| alive(id));
            if let Some(id) = self.victim {
                log::debug!("{} now chases {:?}", me.name, id);
            }
        }

        match self.victim.and_then(|id| bodies.get(id.0)) {
            Some(victim) => victim.position - me.position,
            None => Vec2::ZERO,
        }
    }

    /// Push this tick's direction into the arena
    pub fn update(&mut self, arena: &mut Arena) {
        let direction = self.desired_direction(arena.bodies());
        arena.set_desired_direction(self.body, direction);
    }
}
