//! Patterned boundary walls
//!
//! Each wall runs along one side of the arena. Its long axis is split into
//! equal cells, and every cell is either safe (figures bounce off) or a
//! hazard (figures die on contact).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::error::SimError;
use crate::settings::{ArenaLayout, WallSpec};

/// Which side of the arena a wall guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Top,
    Left,
    Right,
}

impl Side {
    /// Top and bottom walls run along x; figures bounce off them vertically
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Component of `p` along this wall's long axis
    #[inline]
    pub fn along(self, p: Vec2) -> f32 {
        if self.is_horizontal() { p.x } else { p.y }
    }

    /// Bounding rect of a wall of `thickness` on this side of an arena
    pub fn rect(self, arena: Vec2, thickness: f32) -> Aabb {
        match self {
            Side::Bottom => Aabb::new(0.0, arena.y - thickness, arena.x, thickness),
            Side::Top => Aabb::new(0.0, 0.0, arena.x, thickness),
            Side::Left => Aabb::new(0.0, 0.0, thickness, arena.y),
            Side::Right => Aabb::new(arena.x - thickness, 0.0, thickness, arena.y),
        }
    }
}

/// Decoded hazard cells, in order along the wall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardPattern(Vec<bool>);

impl HazardPattern {
    pub const SAFE: char = '-';
    pub const HAZARD: char = 'X';

    /// Decode the compact notation (`-` safe, `X` hazard)
    pub fn parse(pattern: &str) -> Result<Self, SimError> {
        let cells = pattern
            .chars()
            .map(|c| match c {
                Self::SAFE => Ok(false),
                Self::HAZARD => Ok(true),
                other => Err(SimError::config(format!(
                    "unknown hazard pattern cell {other:?} in {pattern:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }

    pub fn from_cells(cells: Vec<bool>) -> Result<Self, SimError> {
        if cells.is_empty() {
            return Err(SimError::config("hazard pattern must not be empty"));
        }
        Ok(Self(cells))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    pub fn cells(&self) -> &[bool] {
        &self.0
    }
}

/// A static boundary segment with a hazard pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    side: Side,
    thickness: f32,
    pattern: HazardPattern,
    rect: Aabb,
    cell_size: f32,
}

impl Wall {
    pub fn new(
        side: Side,
        thickness: f32,
        pattern: HazardPattern,
        arena: Vec2,
    ) -> Result<Self, SimError> {
        if !(thickness > 0.0) {
            return Err(SimError::config(format!(
                "{side:?} wall thickness must be positive, got {thickness}"
            )));
        }
        if !(arena.x > 0.0 && arena.y > 0.0) {
            return Err(SimError::config(format!(
                "arena size must be positive, got {arena}"
            )));
        }
        let rect = side.rect(arena, thickness);
        let cell_size = side.along(rect.size) / pattern.len() as f32;
        Ok(Self {
            side,
            thickness,
            pattern,
            rect,
            cell_size,
        })
    }

    pub fn from_spec(spec: &WallSpec, layout: &ArenaLayout) -> Result<Self, SimError> {
        let pattern = HazardPattern::parse(&spec.pattern)?;
        Self::new(spec.side, layout.wall_thickness, pattern, layout.extent())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn pattern(&self) -> &HazardPattern {
        &self.pattern
    }

    pub fn bounding_rect(&self) -> &Aabb {
        &self.rect
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Length of the long axis
    pub fn axis_length(&self) -> f32 {
        self.side.along(self.rect.size)
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.rect.overlaps(other)
    }

    /// Hazard flag of the cell under a world coordinate on the long axis
    pub fn hazard_at(&self, coordinate: f32) -> Result<bool, SimError> {
        let local = coordinate - self.side.along(self.rect.min);
        let length = self.axis_length();
        if !(0.0..length).contains(&local) {
            return Err(SimError::OutOfRangeQuery {
                side: self.side,
                coordinate,
                length,
            });
        }
        // Float division can land exactly on len() for the last cell
        let index = ((local / self.cell_size) as usize).min(self.pattern.len() - 1);
        Ok(self.pattern.get(index).unwrap_or(false))
    }

    /// Like [`Wall::hazard_at`], treating an out-of-range query as safe.
    ///
    /// An out-of-range query means the broad phase let through a box that
    /// does not sit over this wall. Debug builds stop on it.
    pub fn is_hazard_at(&self, coordinate: f32) -> bool {
        match self.hazard_at(coordinate) {
            Ok(hazard) => hazard,
            Err(err) => {
                debug_assert!(false, "{err}");
                log::warn!("{err}");
                false
            }
        }
    }

    /// Cells laid out along the wall as `(rect, hazard)`, for drawing
    pub fn cells(&self) -> impl Iterator<Item = (Aabb, bool)> + '_ {
        let step = if self.side.is_horizontal() {
            Vec2::new(self.cell_size, 0.0)
        } else {
            Vec2::new(0.0, self.cell_size)
        };
        let cell_extent = if self.side.is_horizontal() {
            Vec2::new(self.cell_size, self.rect.size.y)
        } else {
            Vec2::new(self.rect.size.x, self.cell_size)
        };
        let first = Aabb::from_min_size(self.rect.min, cell_extent);
        self.pattern
            .cells()
            .iter()
            .enumerate()
            .map(move |(i, &hazard)| (first.translated(step * i as f32), hazard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(1000.0, 600.0);

    fn wall(side: Side, pattern: &str) -> Wall {
        Wall::new(side, 50.0, HazardPattern::parse(pattern).unwrap(), ARENA).unwrap()
    }

    #[test]
    fn test_parse_pattern() {
        let p = HazardPattern::parse("--XX-").unwrap();
        assert_eq!(p.cells(), &[false, false, true, true, false]);
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert!(matches!(
            HazardPattern::parse(""),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HazardPattern::parse("--o-"),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_thickness() {
        let p = HazardPattern::parse("-").unwrap();
        assert!(Wall::new(Side::Top, 0.0, p, ARENA).is_err());
    }

    #[test]
    fn test_rects_per_side() {
        assert_eq!(
            *wall(Side::Bottom, "-").bounding_rect(),
            Aabb::new(0.0, 550.0, 1000.0, 50.0)
        );
        assert_eq!(
            *wall(Side::Right, "-").bounding_rect(),
            Aabb::new(950.0, 0.0, 50.0, 600.0)
        );
    }

    #[test]
    fn test_cell_size() {
        let top = wall(Side::Top, "--XX--XX--X--XX--XX--");
        assert!((top.cell_size() - 1000.0 / 21.0).abs() < 1e-4);
        let left = wall(Side::Left, "---XX--XX---");
        assert!((left.cell_size() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_hazard_lookup_horizontal() {
        let top = wall(Side::Top, "--XX--XX--X--XX--XX--");
        // cell 0 and 1 safe, 2 and 3 hazard
        assert!(!top.hazard_at(10.0).unwrap());
        assert!(!top.hazard_at(90.0).unwrap());
        assert!(top.hazard_at(100.0).unwrap());
        assert!(top.hazard_at(180.0).unwrap());
        assert!(!top.hazard_at(200.0).unwrap());
    }

    #[test]
    fn test_hazard_lookup_vertical() {
        let left = wall(Side::Left, "---XX--XX---");
        assert!(!left.hazard_at(149.0).unwrap());
        assert!(left.hazard_at(150.0).unwrap());
        assert!(left.hazard_at(249.0).unwrap());
        assert!(!left.hazard_at(250.0).unwrap());
        assert!(!left.hazard_at(599.9).unwrap());
    }

    #[test]
    fn test_out_of_range_query() {
        let top = wall(Side::Top, "-X");
        assert!(matches!(
            top.hazard_at(-1.0),
            Err(SimError::OutOfRangeQuery { side: Side::Top, .. })
        ));
        assert!(top.hazard_at(1000.0).is_err());
    }

    #[test]
    fn test_cells_cover_the_wall() {
        let right = wall(Side::Right, "-X-");
        let cells: Vec<_> = right.cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1].0, Aabb::new(950.0, 200.0, 50.0, 200.0));
        assert!(cells[1].1);
        assert!(!cells[2].1);
    }
}
