//! Session state: walls, figures, clock
//!
//! Walls and figures are created once when the session starts and live for
//! the whole session. Death only flips `alive`; the corpse stays in place.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::wall::{Side, Wall};
use crate::error::SimError;
use crate::settings::{ArenaLayout, Settings, Tuning};

/// Something noteworthy that happened during an update, for audio and effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    /// A figure touched a hazard cell
    Died { body: BodyId, side: Side, at: Vec2 },
    /// A figure bounced off a safe wall cell
    Bounced { body: BodyId, side: Side },
    /// A figure ran into another one
    Collided { body: BodyId, partner: BodyId },
}

/// The arena and everything in it
#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) tuning: Tuning,
    layout: ArenaLayout,
    /// Collision checks walk this list in order
    pub(crate) walls: Vec<Wall>,
    /// Indexed by `BodyId`
    pub(crate) bodies: Vec<Body>,
    /// Simulation time in seconds
    pub(crate) clock: f64,
    pub(crate) events: Vec<ArenaEvent>,
}

impl Arena {
    /// Build the walls described by `settings`
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let layout = settings.arena.clone();
        let walls = layout
            .walls
            .iter()
            .map(|spec| Wall::from_spec(spec, &layout))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Arena {}x{} with walls {:?}",
            layout.width,
            layout.height,
            walls.iter().map(Wall::side).collect::<Vec<_>>()
        );

        Ok(Self {
            tuning: settings.tuning.clone(),
            layout,
            walls,
            bodies: Vec::new(),
            clock: 0.0,
            events: Vec::new(),
        })
    }

    /// Add a figure centred on `centre`. Figures are updated in spawn order.
    pub fn spawn(&mut self, name: impl Into<String>, centre: Vec2) -> BodyId {
        let id = BodyId(self.bodies.len());
        let mut body = Body::new(id, name, self.tuning.player_size);
        body.set_centre(centre, self.clock);
        log::info!("Spawned {} ({:?}) at {}", body.name, id, centre);
        self.bodies.push(body);
        id
    }

    /// Bring a figure back to life at `centre`
    pub fn respawn(&mut self, id: BodyId, centre: Vec2) -> bool {
        let now = self.clock;
        match self.bodies.get_mut(id.0) {
            Some(body) => {
                body.respawn(centre, now);
                log::info!("Respawned {} at {}", body.name, centre);
                true
            }
            None => false,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &ArenaLayout {
        &self.layout
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub(crate) fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn alive_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.alive).count()
    }

    /// Forward a controller's direction request
    pub fn set_desired_direction(&mut self, id: BodyId, direction: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_desired_direction(direction);
        }
    }

    /// Boost a figure at the current clock. False while dizzy or unknown.
    pub fn activate_boost(&mut self, id: BodyId) -> bool {
        let (now, boost_speed) = (self.clock, self.tuning.boost_speed);
        self.bodies
            .get_mut(id.0)
            .is_some_and(|body| body.activate_boost(now, boost_speed))
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Mutable access to two distinct figures at once
pub(crate) fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> Option<(&mut Body, &mut Body)> {
    if a == b || a.max(b) >= bodies.len() {
        return None;
    }
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        Some((&mut lo[a], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        Some((&mut hi[0], &mut lo[b]))
    }
}
