//! Per-figure integration step
//!
//! Each update ramps the figure's speed, then walks the planned displacement
//! in fixed micro-steps, checking for collisions after every one. Figures
//! are updated one after another: by the time the second figure moves, the
//! first one's position for this tick is already final.

use super::body::BodyId;
use super::collision::{CollisionOutcome, CollisionSystem, reflect_off_wall, respond_player_collision};
use super::state::{Arena, ArenaEvent, pair_mut};

impl Arena {
    /// Advance the clock by `dt` and update every figure in spawn order
    pub fn tick(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        let now = self.clock;
        for index in 0..self.bodies.len() {
            self.update_body(BodyId(index), now);
        }
    }

    /// Integrate one figure for `elapsed` seconds past its last update
    pub fn integrate(&mut self, id: BodyId, elapsed: f64) {
        if !elapsed.is_finite() {
            log::warn!("ignoring non-finite elapsed time {elapsed} for {id:?}");
            return;
        }
        if let Some(body) = self.bodies.get(id.0) {
            let now = body.last_update + elapsed;
            self.update_body(id, now);
        }
    }

    /// Bring one figure up to simulation time `now`
    pub fn update_body(&mut self, id: BodyId, now: f64) {
        let index = id.0;
        let Some(body) = self.bodies.get(index) else {
            log::warn!("update for unknown body {id:?}");
            return;
        };
        if !body.alive {
            return;
        }
        let raw_elapsed = now - body.last_update;
        if !(raw_elapsed > 0.0 && raw_elapsed.is_finite()) {
            return;
        }
        let elapsed = raw_elapsed.min(self.tuning.max_elapsed) as f32;
        let step_length = self.tuning.step_length;

        let body = &mut self.bodies[index];
        body.steer(&self.tuning, elapsed, now);
        let steps = body.planned_steps(elapsed, step_length);

        for _ in 0..steps {
            let step = self.bodies[index].velocity_direction * step_length;
            self.bodies[index].position += step;

            let outcome = CollisionSystem::new(&self.walls, &self.bodies).check(&self.bodies[index]);
            let body = &mut self.bodies[index];
            match outcome {
                CollisionOutcome::None => continue,
                CollisionOutcome::HazardHit { side } => {
                    body.alive = false;
                    log::info!("{} hit the {:?} wall hazard at {}", body.name, side, body.center());
                    self.events.push(ArenaEvent::Died {
                        body: id,
                        side,
                        at: body.center(),
                    });
                    break;
                }
                CollisionOutcome::HorizontalBounce { side } | CollisionOutcome::VerticalBounce { side } => {
                    body.position -= step;
                    body.make_dizzy(now, self.tuning.dizzy_duration);
                    body.velocity_direction = reflect_off_wall(body.velocity_direction, side);
                    log::debug!("{} bounced off the {:?} wall", body.name, side);
                    self.events.push(ArenaEvent::Bounced { body: id, side });
                }
                CollisionOutcome::PlayerCollision(partner) => {
                    body.position -= step;
                    body.make_dizzy(now, self.tuning.dizzy_duration);
                    if let Some((mover, other)) = pair_mut(&mut self.bodies, index, partner.0) {
                        respond_player_collision(mover, other);
                        log::debug!(
                            "{} ran into {} (speeds now {} / {})",
                            mover.name,
                            other.name,
                            mover.speed,
                            other.speed
                        );
                    }
                    self.events.push(ArenaEvent::Collided { body: id, partner });
                }
            }
        }

        self.bodies[index].last_update = now;
    }
}
