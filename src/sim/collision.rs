//! Collision detection and response
//!
//! Detection runs after every micro-step of a figure: walls first (in
//! registration order, first overlap wins), then the other living figures.
//! The response is deliberately arcade-like: walls reflect the heading, and
//! two figures swap speeds and are pushed apart along the line between them.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::wall::{Side, Wall};
use crate::{heading_angle, rotate};

/// Result of checking one micro-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing touched
    None,
    /// The box centre sits over a hazard cell
    HazardHit { side: Side },
    /// Safe cell of a top or bottom wall
    HorizontalBounce { side: Side },
    /// Safe cell of a left or right wall
    VerticalBounce { side: Side },
    /// Touched another living figure
    PlayerCollision(BodyId),
}

/// Read-only view of the arena used to classify a figure's current step
#[derive(Debug, Clone, Copy)]
pub struct CollisionSystem<'a> {
    walls: &'a [Wall],
    bodies: &'a [Body],
}

impl<'a> CollisionSystem<'a> {
    pub fn new(walls: &'a [Wall], bodies: &'a [Body]) -> Self {
        Self { walls, bodies }
    }

    /// Classify `body` at its current position
    pub fn check(&self, body: &Body) -> CollisionOutcome {
        let bbox = body.bounding_box();

        if let Some(wall) = self.walls.iter().find(|w| w.overlaps(&bbox)) {
            let side = wall.side();
            return if wall.is_hazard_at(side.along(bbox.center())) {
                CollisionOutcome::HazardHit { side }
            } else if side.is_horizontal() {
                CollisionOutcome::HorizontalBounce { side }
            } else {
                CollisionOutcome::VerticalBounce { side }
            };
        }

        // Diameter rather than radius: generous on purpose
        self.bodies
            .iter()
            .filter(|other| other.id != body.id && other.alive)
            .find(|other| (body.position - other.position).length() <= body.size)
            .map_or(CollisionOutcome::None, |other| {
                CollisionOutcome::PlayerCollision(other.id)
            })
    }
}

/// Heading after bouncing off a safe wall cell
pub fn reflect_off_wall(direction: Vec2, side: Side) -> Vec2 {
    if side.is_horizontal() {
        Vec2::new(direction.x, -direction.y)
    } else {
        Vec2::new(-direction.x, direction.y)
    }
}

/// Exchange between a figure that ran into `partner` and the partner itself.
///
/// Speeds are swapped. The mover's heading is turned to point from the
/// partner to the mover, and the partner leaves in the opposite direction.
/// `mover` must already be back at its pre-collision position.
pub fn respond_player_collision(mover: &mut Body, partner: &mut Body) {
    std::mem::swap(&mut mover.speed, &mut partner.speed);

    let collision_angle = heading_angle(mover.position - partner.position);
    let turn = collision_angle - heading_angle(mover.velocity_direction);
    mover.velocity_direction = rotate(mover.velocity_direction, turn);
    // Derived from the mover's new heading, not the old one
    partner.velocity_direction = -mover.velocity_direction;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ArenaLayout;
    use proptest::prelude::*;

    fn walls(layout: &ArenaLayout) -> Vec<Wall> {
        layout
            .walls
            .iter()
            .map(|spec| Wall::from_spec(spec, layout).unwrap())
            .collect()
    }

    fn body_at(id: usize, x: f32, y: f32) -> Body {
        let mut b = Body::new(BodyId(id), format!("fig{id}"), 50.0);
        b.position = Vec2::new(x, y);
        b
    }

    #[test]
    fn test_no_collision_in_open_space() {
        let layout = ArenaLayout::default();
        let walls = walls(&layout);
        let bodies = vec![body_at(0, 400.0, 250.0), body_at(1, 700.0, 250.0)];
        let system = CollisionSystem::new(&walls, &bodies);
        assert_eq!(system.check(&bodies[0]), CollisionOutcome::None);
    }

    #[test]
    fn test_top_wall_safe_and_hazard() {
        let layout = ArenaLayout::default();
        let walls = walls(&layout);
        // Top pattern cells 0-1 are safe, cells 2-3 (x in ~[95, 190)) are hazards
        let safe = body_at(0, 50.0, 49.0);
        let deadly = body_at(1, 115.0, 49.0);
        let system = CollisionSystem::new(&walls, &[]);
        assert_eq!(
            system.check(&safe),
            CollisionOutcome::HorizontalBounce { side: Side::Top }
        );
        assert_eq!(
            system.check(&deadly),
            CollisionOutcome::HazardHit { side: Side::Top }
        );
    }

    #[test]
    fn test_side_walls_bounce_vertically() {
        let layout = ArenaLayout::default();
        let walls = walls(&layout);
        let system = CollisionSystem::new(&walls, &[]);
        // Left pattern cell 1 (y in [50, 100)) is safe
        let b = body_at(0, 49.0, 60.0);
        assert_eq!(
            system.check(&b),
            CollisionOutcome::VerticalBounce { side: Side::Left }
        );
        // Right pattern cell 3 (y in [150, 200)) is a hazard
        let b = body_at(0, 901.0, 150.0);
        assert_eq!(
            system.check(&b),
            CollisionOutcome::HazardHit { side: Side::Right }
        );
    }

    #[test]
    fn test_first_registered_wall_wins_in_corner() {
        let layout = ArenaLayout::uniform(1000.0, 600.0, 50.0, false);
        let walls = walls(&layout);
        let system = CollisionSystem::new(&walls, &[]);
        // Overlaps Left and Top at once; Left is registered first
        let b = body_at(0, 49.0, 49.0);
        assert_eq!(
            system.check(&b),
            CollisionOutcome::VerticalBounce { side: Side::Left }
        );
    }

    #[test]
    fn test_walls_take_precedence_over_players() {
        let layout = ArenaLayout::default();
        let walls = walls(&layout);
        let bodies = vec![body_at(0, 50.0, 49.0), body_at(1, 60.0, 60.0)];
        let system = CollisionSystem::new(&walls, &bodies);
        assert!(matches!(
            system.check(&bodies[0]),
            CollisionOutcome::HorizontalBounce { .. }
        ));
    }

    #[test]
    fn test_player_distance_threshold_is_diameter() {
        let bodies = vec![
            body_at(0, 300.0, 300.0),
            body_at(1, 350.0, 300.0),
            body_at(2, 300.0, 351.0),
        ];
        let system = CollisionSystem::new(&[], &bodies);
        assert_eq!(
            system.check(&bodies[0]),
            CollisionOutcome::PlayerCollision(BodyId(1))
        );
        assert_eq!(system.check(&bodies[2]), CollisionOutcome::None);
    }

    #[test]
    fn test_dead_players_are_ignored() {
        let mut bodies = vec![body_at(0, 300.0, 300.0), body_at(1, 320.0, 300.0)];
        bodies[1].alive = false;
        let system = CollisionSystem::new(&[], &bodies);
        assert_eq!(system.check(&bodies[0]), CollisionOutcome::None);
    }

    #[test]
    fn test_reflect_off_wall() {
        let d = Vec2::new(0.6, -0.8);
        assert_eq!(reflect_off_wall(d, Side::Top), Vec2::new(0.6, 0.8));
        assert_eq!(reflect_off_wall(d, Side::Bottom), Vec2::new(0.6, 0.8));
        assert_eq!(reflect_off_wall(d, Side::Left), Vec2::new(-0.6, -0.8));
        assert_eq!(reflect_off_wall(d, Side::Right), Vec2::new(-0.6, -0.8));
    }

    #[test]
    fn test_head_on_player_collision() {
        let mut a = body_at(0, 300.0, 300.0);
        let mut b = body_at(1, 351.0, 300.0);
        a.speed = 1500.0;
        a.velocity_direction = Vec2::X;
        b.speed = 0.0;

        respond_player_collision(&mut a, &mut b);

        assert_eq!(a.speed, 0.0);
        assert_eq!(b.speed, 1500.0);
        // A is turned to point away from B, B leaves the other way
        assert!((a.velocity_direction - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((b.velocity_direction - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_glancing_player_collision_points_away_from_partner() {
        let mut a = body_at(0, 300.0, 300.0);
        let mut b = body_at(1, 330.0, 340.0);
        a.velocity_direction = Vec2::new(0.6, 0.8);
        respond_player_collision(&mut a, &mut b);
        let expected = (a.position - b.position).normalize();
        assert!((a.velocity_direction - expected).length() < 1e-5);
        assert_eq!(b.velocity_direction, -a.velocity_direction);
    }

    proptest! {
        #[test]
        fn prop_exchange_swaps_speeds_and_keeps_unit_headings(
            sa in 0.0f32..1500.0,
            sb in 0.0f32..1500.0,
            heading in -std::f32::consts::PI..std::f32::consts::PI,
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            prop_assume!(dx.abs() > 0.01 || dy.abs() > 0.01);
            let mut a = body_at(0, 400.0, 300.0);
            let mut b = body_at(1, 400.0 + dx, 300.0 + dy);
            a.speed = sa;
            b.speed = sb;
            a.velocity_direction = Vec2::from_angle(heading);

            respond_player_collision(&mut a, &mut b);

            prop_assert_eq!(a.speed, sb);
            prop_assert_eq!(b.speed, sa);
            prop_assert!((a.velocity_direction.length() - 1.0).abs() < 1e-4);
            prop_assert!((b.velocity_direction.length() - 1.0).abs() < 1e-4);
        }
    }
}
