//! Grid ray casting
//!
//! A ray is tested against the two families of grid lines separately: the
//! vertical lines (constant x, between columns) and the horizontal lines
//! (constant y, between rows). Each test walks one line at a time from the
//! first line ahead of the origin and stops at the first crossing that leads
//! into a wall tile. The nearer of the two hits is the wall the ray sees.
//!
//! Crossing points are computed from the line index rather than accumulated,
//! so long rays do not drift. The tile entered after a crossing is picked
//! from the line index along the stepping axis and the direction of travel
//! along the other axis, which keeps rays that pass exactly through a tile
//! corner from being attributed to the wrong tile.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, Tile};
use super::pose::Pose;
use crate::{heading_vector, normalize_degrees};

/// A ray from a world point at a heading in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Heading in degrees, normalized to [0, 360)
    pub angle: f32,
}

impl Ray {
    pub fn new(origin: Vec2, angle_deg: f32) -> Self {
        Self {
            origin,
            angle: normalize_degrees(angle_deg),
        }
    }

    /// Ray from the pose position, turned `offset_deg` from the pose heading
    pub fn from_pose(pose: &Pose, offset_deg: f32) -> Self {
        Self::new(pose.pos, pose.angle() + offset_deg)
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        heading_vector(self.angle)
    }
}

/// Family of grid lines a ray crossed when it hit a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    /// Constant-x line, the wall face points east or west
    Vertical,
    /// Constant-y line, the wall face points north or south
    Horizontal,
}

/// Where a ray met a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Crossing point on the wall boundary
    pub point: Vec2,
    /// Squared distance from the ray origin to `point`
    pub distance_sq: f32,
    pub side: WallSide,
    /// Wall tile that was entered
    pub cell: Cell,
}

impl WallHit {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance_sq.sqrt()
    }
}

/// Outcome of a single ray test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastResult {
    Hit(WallHit),
    /// Left the grid, or can never cross a line of the tested family
    Miss,
    /// Gave up after `max_steps` crossings; treated as a miss by consumers
    StepLimit,
}

impl CastResult {
    #[inline]
    pub fn hit(&self) -> Option<&WallHit> {
        match self {
            CastResult::Hit(hit) => Some(hit),
            _ => None,
        }
    }

    /// Linear distance to the wall, `None` for misses
    pub fn distance(&self) -> Option<f32> {
        self.hit().map(WallHit::distance)
    }

    /// Squared distance, infinite for misses
    pub fn distance_sq(&self) -> f32 {
        self.hit().map_or(f32::INFINITY, |hit| hit.distance_sq)
    }

    /// Keep whichever result sees the nearer wall
    ///
    /// A step-limit outcome survives over a plain miss so callers can report it.
    pub fn nearest(self, other: CastResult) -> CastResult {
        match (self, other) {
            (CastResult::Hit(a), CastResult::Hit(b)) => {
                if b.distance_sq < a.distance_sq {
                    CastResult::Hit(b)
                } else {
                    CastResult::Hit(a)
                }
            }
            (CastResult::Hit(hit), _) | (_, CastResult::Hit(hit)) => CastResult::Hit(hit),
            (CastResult::StepLimit, _) | (_, CastResult::StepLimit) => CastResult::StepLimit,
            _ => CastResult::Miss,
        }
    }
}

/// Crossing budget for one line family
///
/// A ray inside the grid crosses at most `columns + 1` vertical lines (or
/// `rows + 1` horizontal ones) before it leaves, so this is never reached on
/// well-formed input.
#[inline]
pub fn max_steps(grid: &Grid) -> usize {
    grid.rows() + grid.columns() + 2
}

/// Nearest wall along the ray, checking both line families
pub fn cast_ray(ray: &Ray, grid: &Grid) -> CastResult {
    cast_ray_within(ray, grid, max_steps(grid))
}

/// `cast_ray` with an explicit crossing budget per line family
pub(crate) fn cast_ray_within(ray: &Ray, grid: &Grid, max_steps: usize) -> CastResult {
    vertical_crossings(ray, grid, max_steps).nearest(horizontal_crossings(ray, grid, max_steps))
}

/// Nearest wall for a view column `angle_offset_deg` away from the pose heading
pub fn cast_column(pose: &Pose, grid: &Grid, angle_offset_deg: f32) -> CastResult {
    cast_ray(&Ray::from_pose(pose, angle_offset_deg), grid)
}

/// First wall reached through a vertical (constant-x) grid line
pub fn vertical_line_test(ray: &Ray, grid: &Grid) -> CastResult {
    vertical_crossings(ray, grid, max_steps(grid))
}

/// First wall reached through a horizontal (constant-y) grid line
pub fn horizontal_line_test(ray: &Ray, grid: &Grid) -> CastResult {
    horizontal_crossings(ray, grid, max_steps(grid))
}

fn vertical_crossings(ray: &Ray, grid: &Grid, max_steps: usize) -> CastResult {
    // Parallel to the vertical lines
    if ray.angle == 90.0 || ray.angle == 270.0 {
        return CastResult::Miss;
    }
    march_lines(ray, grid, WallSide::Vertical, max_steps)
}

fn horizontal_crossings(ray: &Ray, grid: &Grid, max_steps: usize) -> CastResult {
    // Parallel to the horizontal lines
    if ray.angle == 0.0 || ray.angle == 180.0 {
        return CastResult::Miss;
    }
    march_lines(ray, grid, WallSide::Horizontal, max_steps)
}

fn march_lines(ray: &Ray, grid: &Grid, side: WallSide, max_steps: usize) -> CastResult {
    // `a` is the axis the lines are stepped along, `b` the other one
    let (a, b) = match side {
        WallSide::Vertical => (0, 1),
        WallSide::Horizontal => (1, 0),
    };

    let dir = ray.direction();
    let origin = ray.origin;
    if !origin.is_finite() || dir[a] == 0.0 {
        return CastResult::Miss;
    }

    let tile = grid.block_size();
    let forward = dir[a] > 0.0;
    let slope = dir[b] / dir[a];

    // Index of the first line ahead of the origin, then one line per step
    let origin_index = (origin[a] / tile).floor() as i64;
    let (first_line, line_step) = if forward {
        (origin_index.saturating_add(1), 1)
    } else {
        (origin_index, -1)
    };

    for i in 0..max_steps as i64 {
        let line = first_line.saturating_add(i * line_step);

        let mut point = Vec2::ZERO;
        point[a] = line as f32 * tile;
        point[b] = origin[b] + (point[a] - origin[a]) * slope;
        if !point.is_finite() {
            return CastResult::Miss;
        }

        // Tile on the far side of the line
        let cell_a = if forward { line } else { line.saturating_sub(1) };
        let scaled_b = point[b] / tile;
        let mut cell_b = scaled_b.floor();
        if dir[b] < 0.0 && cell_b == scaled_b {
            // Exactly on a perpendicular line while heading toward lower indices
            cell_b -= 1.0;
        }
        let cell = match side {
            WallSide::Vertical => Cell {
                row: cell_b as i64,
                column: cell_a,
            },
            WallSide::Horizontal => Cell {
                row: cell_a,
                column: cell_b as i64,
            },
        };

        match grid.tile(cell) {
            None => return CastResult::Miss,
            Some(Tile::Wall) => {
                return CastResult::Hit(WallHit {
                    point,
                    distance_sq: point.distance_squared(origin),
                    side,
                    cell,
                });
            }
            Some(Tile::Empty) => {}
        }
    }

    log::debug!(
        "ray from {:?} at {:.3}° exhausted {} {:?} crossings",
        origin,
        ray.angle,
        max_steps,
        side
    );
    CastResult::StepLimit
}
