//! Simulation state
//!
//! Everything a frame needs lives in one struct that is passed to `tick` and
//! `render_view`; nothing is global.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::pose::Pose;
use crate::settings::{MotionSettings, Settings};

/// Complete demo state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Level tiles (never edited after load)
    pub grid: Grid,
    /// Player pose
    pub pose: Pose,
    /// Movement tuning
    pub motion: MotionSettings,
    /// Overhead map shown next to the view
    pub debug_overlay: bool,
    /// Debug key was down last tick (for edge-triggered toggling)
    #[serde(skip)]
    pub debug_key_held: bool,
    /// Ticks since start
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(grid: Grid, pose: Pose, motion: MotionSettings) -> Self {
        Self {
            grid,
            pose,
            motion,
            debug_overlay: true,
            debug_key_held: false,
            time_ticks: 0,
        }
    }

    /// State for a level using the configured start pose and tuning
    pub fn from_settings(settings: &Settings, grid: Grid) -> Self {
        let mut state = Self::new(grid, settings.start.pose(), settings.movement);
        state.debug_overlay = settings.debug_overlay;
        if grid_tile_under(&state).is_none_or(|wall| wall) {
            log::warn!(
                "Start position {:?} is not on an open tile; rays may behave oddly",
                state.pose.pos
            );
        }
        state
    }
}

/// Whether the tile under the player is a wall, `None` outside the grid
fn grid_tile_under(state: &SimState) -> Option<bool> {
    state.grid.tile_at(state.pose.pos).map(|tile| tile.is_wall())
}
