//! Raycast Demo - A first-person grid raycaster
//!
//! Core modules:
//! - `sim`: Pure simulation (tile grid, player pose, ray casting, projection)
//! - `renderer`: Software framebuffer drawing (view slices, overhead map, layout)
//! - `platform`: Frame clock and keyboard input mapping
//! - `settings`: Data-driven view and movement configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Demo configuration constants
pub mod consts {
    /// Internal view resolution (the projection plane)
    pub const TARGET_WIDTH: usize = 320;
    pub const TARGET_HEIGHT: usize = 180;
    pub const TARGET_ASPECT_RATIO: f32 = TARGET_WIDTH as f32 / TARGET_HEIGHT as f32;

    /// Horizontal field of view (degrees)
    pub const FIELD_OF_VIEW: f32 = 60.0;

    /// World units per grid tile
    pub const LEVEL_BLOCK_SIZE: f32 = 64.0;

    /// Player defaults
    pub const PLAYER_MOVE_SPEED: f32 = 64.0; // world units/s
    pub const PLAYER_TURN_SPEED: f32 = 180.0; // degrees/s
    pub const PLAYER_START_X: f32 = LEVEL_BLOCK_SIZE * 3.5;
    pub const PLAYER_START_Y: f32 = LEVEL_BLOCK_SIZE * 7.5;
    pub const PLAYER_START_ANGLE: f32 = 90.0;

    /// Overhead map drawing
    pub const PLAYER_BLOCK_SIZE: i32 = 15;
    pub const PLAYER_DIRECTION_LENGTH: f32 = 30.0;
    pub const MAP_OFFSET: (i32, i32) = (10, 10);

    /// Longest frame step accepted by the frame clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Non-finite input maps to 0 so a corrupted heading can't poison the trig.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction for a heading in degrees
///
/// World y grows downward (rows), so a positive angle turns counter-clockwise
/// on screen: 0° faces +x, 90° faces toward row 0. Quarter turns give exact
/// axis vectors so a ray along a grid line stays on it.
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let angle = normalize_degrees(angle_deg);
    if angle == 0.0 {
        Vec2::X
    } else if angle == 90.0 {
        Vec2::NEG_Y
    } else if angle == 180.0 {
        Vec2::NEG_X
    } else if angle == 270.0 {
        Vec2::Y
    } else {
        let rad = angle.to_radians();
        Vec2::new(rad.cos(), -rad.sin())
    }
}
