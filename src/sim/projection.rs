//! Column projection
//!
//! Sweeps one ray per screen column across the field of view, removes the
//! fisheye stretch and turns each distance into a wall-slice height on the
//! projection plane.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::pose::Pose;
use super::raycast::{CastResult, Ray, WallSide, cast_ray_within, max_steps};
use crate::consts::{FIELD_OF_VIEW, LEVEL_BLOCK_SIZE, TARGET_HEIGHT, TARGET_WIDTH};

/// Projection plane geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Output column count (view width in pixels)
    pub columns: usize,
    /// View height in pixels
    pub view_height: u32,
    /// Horizontal field of view in degrees
    pub fov_deg: f32,
    /// World height of a wall slice (usually the block size)
    pub slice_height: f32,
    /// Distance from the eye to the projection plane, in pixels
    pub plane_distance: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new(
            TARGET_WIDTH,
            TARGET_HEIGHT as u32,
            FIELD_OF_VIEW,
            LEVEL_BLOCK_SIZE,
        )
    }
}

impl ProjectionConfig {
    /// Derive the plane distance so `columns` pixels span `fov_deg`
    pub fn new(columns: usize, view_height: u32, fov_deg: f32, slice_height: f32) -> Self {
        Self {
            columns,
            view_height,
            fov_deg,
            slice_height,
            plane_distance: plane_distance_for(columns, fov_deg),
        }
    }

    /// Use a fixed plane distance instead of the derived one
    pub fn with_plane_distance(mut self, plane_distance: f32) -> Self {
        self.plane_distance = plane_distance;
        self
    }
}

/// `(columns / 2) / tan(fov / 2)`, about 277 for 320 columns at 60°
pub fn plane_distance_for(columns: usize, fov_deg: f32) -> f32 {
    let half_fov = (fov_deg * 0.5).to_radians();
    (columns as f32 * 0.5) / half_fov.tan()
}

/// Heading offset of a column's center, `+fov/2` at the left edge
///
/// Offsets are antisymmetric around the middle of the view.
pub fn column_angle_offset(column: usize, columns: usize, fov_deg: f32) -> f32 {
    if columns == 0 {
        return 0.0;
    }
    let step = fov_deg / columns as f32;
    fov_deg * 0.5 - (column as f32 + 0.5) * step
}

/// Perpendicular distance to the projection plane
#[inline]
pub fn correct_fisheye(distance: f32, angle_offset_deg: f32) -> f32 {
    distance * angle_offset_deg.to_radians().cos()
}

/// Slice height in pixels for a (fisheye corrected) distance
///
/// Falls off as `1 / distance`, clamped to the view height. Distances that
/// are not finite project to nothing.
pub fn project_height(distance: f32, config: &ProjectionConfig) -> u32 {
    if !distance.is_finite() {
        return 0;
    }
    if distance <= 0.0 {
        return config.view_height;
    }
    let height = config.plane_distance * config.slice_height / distance;
    if height.is_finite() && height > 0.0 {
        (height.round() as u32).min(config.view_height)
    } else {
        0
    }
}

/// First and last row of a slice centered in the view, `None` when empty
pub fn slice_span(height: u32, view_height: u32) -> Option<(u32, u32)> {
    let height = height.min(view_height);
    if height == 0 {
        return None;
    }
    let top = (view_height - height) / 2;
    Some((top, top + height - 1))
}

/// One projected view column
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnSlice {
    /// Heading offset from the view center (degrees)
    pub angle_offset: f32,
    /// Straight-line distance to the wall, `None` when the ray missed
    pub distance: Option<f32>,
    /// Distance along the view direction, used for the height
    pub corrected_distance: Option<f32>,
    /// Slice height in pixels
    pub height: u32,
    pub side: Option<WallSide>,
}

impl ColumnSlice {
    fn from_cast(result: &CastResult, angle_offset: f32, config: &ProjectionConfig) -> Self {
        match result.hit() {
            Some(hit) => {
                let distance = hit.distance();
                let corrected = correct_fisheye(distance, angle_offset);
                Self {
                    angle_offset,
                    distance: Some(distance),
                    corrected_distance: Some(corrected),
                    height: project_height(corrected, config),
                    side: Some(hit.side),
                }
            }
            None => Self {
                angle_offset,
                ..Self::default()
            },
        }
    }
}

/// Per-column slices for one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewBuffer {
    pub columns: Vec<ColumnSlice>,
    pub view_height: u32,
    /// Columns whose ray gave up before finding a wall or leaving the grid
    pub step_limited: usize,
}

impl ViewBuffer {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn heights(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.iter().map(|c| c.height)
    }

    /// The column straddling the view center
    pub fn center(&self) -> Option<&ColumnSlice> {
        self.columns.get(self.columns.len() / 2)
    }
}

/// Cast and project every column of the view
///
/// The buffer is built fresh each call. Grid and pose are only read, so the
/// columns are independent; with the `parallel` feature they are cast on the
/// rayon pool.
pub fn render_view(pose: &Pose, grid: &Grid, config: &ProjectionConfig) -> ViewBuffer {
    render_view_within(pose, grid, config, max_steps(grid))
}

fn render_view_within(
    pose: &Pose,
    grid: &Grid,
    config: &ProjectionConfig,
    max_steps: usize,
) -> ViewBuffer {
    let cast = |column: usize| {
        let offset = column_angle_offset(column, config.columns, config.fov_deg);
        let result = cast_ray_within(&Ray::from_pose(pose, offset), grid, max_steps);
        let limited = matches!(result, CastResult::StepLimit);
        (ColumnSlice::from_cast(&result, offset, config), limited)
    };

    #[cfg(feature = "parallel")]
    let cast_columns: Vec<(ColumnSlice, bool)> = {
        use rayon::prelude::*;
        (0..config.columns).into_par_iter().map(cast).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let cast_columns: Vec<(ColumnSlice, bool)> = (0..config.columns).map(cast).collect();

    let step_limited = cast_columns.iter().filter(|(_, limited)| *limited).count();
    if step_limited > 0 {
        log::warn!(
            "{} of {} columns hit the step limit (pose {:?})",
            step_limited,
            config.columns,
            pose
        );
    }

    ViewBuffer {
        columns: cast_columns.into_iter().map(|(slice, _)| slice).collect(),
        view_height: config.view_height,
        step_limited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Walled room with an open interior of `width` x `height` tiles
    fn room(width: usize, height: usize) -> Grid {
        let mut rows = vec![vec![1; width + 2]];
        for _ in 0..height {
            let mut row = vec![0; width + 2];
            row[0] = 1;
            row[width + 1] = 1;
            rows.push(row);
        }
        rows.push(vec![1; width + 2]);
        Grid::from_rows(rows, 64.0).unwrap()
    }

    #[test]
    fn test_plane_distance_for_default_view() {
        let d = plane_distance_for(320, 60.0);
        assert!((d - 277.128).abs() < 0.01);
        assert!((ProjectionConfig::default().plane_distance - d).abs() < 1e-4);
    }

    #[test]
    fn test_column_offsets_span_fov() {
        let first = column_angle_offset(0, 320, 60.0);
        let last = column_angle_offset(319, 320, 60.0);
        assert!((first - (30.0 - 60.0 / 640.0)).abs() < 1e-4);
        assert!((first + last).abs() < 1e-4);
        assert_eq!(column_angle_offset(0, 0, 60.0), 0.0);
    }

    #[test]
    fn test_project_height_falloff() {
        let config = ProjectionConfig::default();
        // One block away fills plane_distance pixels, clamped to the view
        assert_eq!(project_height(64.0, &config), 180);
        let at_416 = project_height(416.0, &config);
        assert_eq!(at_416, (277.128f32 * 64.0 / 416.0).round() as u32);
        assert!(project_height(800.0, &config) < at_416);
        assert_eq!(project_height(f32::INFINITY, &config), 0);
        assert_eq!(project_height(f32::NAN, &config), 0);
        assert_eq!(project_height(0.0, &config), 180);
    }

    #[test]
    fn test_slice_span_is_centered() {
        assert_eq!(slice_span(0, 180), None);
        assert_eq!(slice_span(180, 180), Some((0, 179)));
        assert_eq!(slice_span(100, 180), Some((40, 139)));
        assert_eq!(slice_span(500, 180), Some((0, 179)));
    }

    #[test]
    fn test_fisheye_correction() {
        assert!((correct_fisheye(100.0, 0.0) - 100.0).abs() < 1e-4);
        assert!((correct_fisheye(100.0, 60.0) - 50.0).abs() < 1e-3);
        assert!((correct_fisheye(100.0, -60.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_render_view_fills_every_column() {
        let grid = Grid::default();
        let pose = Pose::new(Vec2::new(224.0, 480.0), 90.0);
        let config = ProjectionConfig::default();
        let view = render_view(&pose, &grid, &config);

        assert_eq!(view.len(), 320);
        assert_eq!(view.view_height, 180);
        assert_eq!(view.step_limited, 0);
        // Enclosed level: every column sees a wall
        assert!(view.columns.iter().all(|c| c.distance.is_some() && c.height > 0));

        let center = view.center().unwrap();
        assert!(center.angle_offset.abs() < 0.2);
        assert!((center.distance.unwrap() - 416.0).abs() < 0.5);
    }

    #[test]
    fn test_flat_wall_has_constant_height() {
        // Facing the east wall squarely: with fisheye correction a flat wall
        // projects to the same height in every column
        let grid = room(10, 10);
        let pose = Pose::new(Vec2::new(96.0, 384.0), 0.0);
        let config = ProjectionConfig::new(320, 180, 40.0, 64.0);
        let view = render_view(&pose, &grid, &config);
        assert!(view.columns.iter().all(|c| c.side == Some(WallSide::Vertical)));

        let heights: Vec<u32> = view.heights().collect();
        let min = heights.iter().min().unwrap();
        let max = heights.iter().max().unwrap();
        assert!(max - min <= 1, "{heights:?}");
    }

    #[test]
    fn test_corridor_view_is_symmetric() {
        // Single-tile-wide corridor, player centered and facing its far end
        let grid = room(1, 10);
        let pose = Pose::new(Vec2::new(96.0, 608.0), 90.0);
        let config = ProjectionConfig::new(64, 180, 60.0, 64.0);
        let view = render_view(&pose, &grid, &config);

        let n = view.len();
        for i in 0..n / 2 {
            let left = &view.columns[i];
            let right = &view.columns[n - 1 - i];
            assert!(
                left.height.abs_diff(right.height) <= 1,
                "column {i}: {} vs {}",
                left.height,
                right.height
            );
            let (l, r) = (left.distance.unwrap(), right.distance.unwrap());
            assert!((l - r).abs() < 0.05, "column {i}: {l} vs {r}");
        }
    }

    #[test]
    fn test_step_limited_columns_are_counted() {
        // Tile center in a 10x10 room: one crossing never reaches a wall
        let grid = room(10, 10);
        let pose = Pose::new(Vec2::new(416.0, 416.0), 0.0);
        let config = ProjectionConfig::default();

        let view = render_view_within(&pose, &grid, &config, 1);
        assert_eq!(view.len(), config.columns);
        assert_eq!(view.step_limited, config.columns);
        assert!(view.columns.iter().all(|c| c.height == 0 && c.distance.is_none()));

        let full = render_view(&pose, &grid, &config);
        assert_eq!(full.step_limited, 0);
        assert!(full.heights().all(|h| h > 0));
    }

    #[test]
    fn test_open_view_has_empty_columns() {
        let grid = Grid::from_rows(vec![vec![0; 4]; 4], 64.0).unwrap();
        let pose = Pose::new(Vec2::new(128.0, 128.0), 0.0);
        let view = render_view(&pose, &grid, &ProjectionConfig::default());
        assert!(view.columns.iter().all(|c| c.distance.is_none() && c.height == 0));
    }

    proptest! {
        #[test]
        fn heights_never_increase_with_distance(a in 0.0f32..5000.0, b in 0.0f32..5000.0) {
            let config = ProjectionConfig::default();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(project_height(near, &config) >= project_height(far, &config));
        }

        #[test]
        fn offsets_are_antisymmetric(columns in 1usize..2000, fov in 1.0f32..170.0) {
            for column in [0, columns / 3, columns / 2] {
                let mirror = columns - 1 - column;
                let sum = column_angle_offset(column, columns, fov)
                    + column_angle_offset(mirror, columns, fov);
                prop_assert!(sum.abs() < 1e-3);
            }
        }
    }
}
