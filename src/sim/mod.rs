//! Pure simulation module
//!
//! The raycasting core and the state it runs on. This module must stay pure:
//! - No platform, clock or rendering dependencies
//! - Grid and pose are only read while casting
//! - Every frame's view buffer is built from scratch

pub mod grid;
pub mod pose;
pub mod projection;
pub mod raycast;
pub mod state;
pub mod tick;

pub use grid::{Cell, Grid, GridError, Tile};
pub use pose::{Axis, Pose, update_pose};
pub use projection::{
    ColumnSlice, ProjectionConfig, ViewBuffer, column_angle_offset, correct_fisheye,
    project_height, render_view, slice_span,
};
pub use raycast::{
    CastResult, Ray, WallHit, WallSide, cast_column, cast_ray, horizontal_line_test,
    vertical_line_test,
};
pub use state::SimState;
pub use tick::{TickInput, tick};
