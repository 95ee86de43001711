//! Overhead map for the debug overlay
//!
//! Drawn at one screen pixel per world unit, shifted by the map offset.

use glam::Vec2;

use super::framebuffer::Framebuffer;
use super::layout::Rect;
use super::palette;
use crate::consts::{PLAYER_BLOCK_SIZE, PLAYER_DIRECTION_LENGTH};
use crate::sim::{CastResult, Grid, Pose, Tile};

/// Draw the tiles, the player marker and (if given) the central ray's hit
pub fn draw_overhead(
    fb: &mut Framebuffer,
    grid: &Grid,
    pose: &Pose,
    offset: (i32, i32),
    center_ray: Option<&CastResult>,
) {
    draw_tiles(fb, grid, offset);

    let origin = to_screen(pose.pos, offset);
    if let Some(hit) = center_ray.and_then(CastResult::hit) {
        let end = to_screen(hit.point, offset);
        fb.line(origin.0, origin.1, end.0, end.1, palette::MAP_RAY);
        fb.fill_rect(Rect::new(end.0 - 1, end.1 - 1, 3, 3), palette::MAP_RAY);
    }

    draw_player(fb, pose, offset);
}

fn draw_tiles(fb: &mut Framebuffer, grid: &Grid, offset: (i32, i32)) {
    let block = grid.block_size() as i32;
    for (cell, tile) in grid.cells() {
        let color = match tile {
            Tile::Wall => palette::MAP_WALL,
            Tile::Empty => palette::MAP_FLOOR,
        };
        // 1px gap on every side so the grid lines show through
        let rect = Rect::new(
            offset.0 + block * cell.column as i32 + 1,
            offset.1 + block * cell.row as i32 + 1,
            block - 2,
            block - 2,
        );
        fb.fill_rect(rect, color);
    }
}

fn draw_player(fb: &mut Framebuffer, pose: &Pose, offset: (i32, i32)) {
    let (x, y) = to_screen(pose.pos, offset);
    let half = PLAYER_BLOCK_SIZE / 2;
    fb.fill_rect(
        Rect::new(x - half, y - half, PLAYER_BLOCK_SIZE, PLAYER_BLOCK_SIZE),
        palette::MAP_PLAYER,
    );

    let tip = to_screen(pose.pos + pose.forward() * PLAYER_DIRECTION_LENGTH, offset);
    fb.line(x, y, tip.0, tip.1, palette::MAP_PLAYER);
}

/// Largest map coordinate kept; anything past it is far off any screen
const MAP_COORD_LIMIT: f32 = (i32::MAX / 4) as f32;

#[inline]
fn to_screen(point: Vec2, offset: (i32, i32)) -> (i32, i32) {
    let axis = |value: f32, offset: i32| {
        let clamped = value.round().clamp(-MAP_COORD_LIMIT, MAP_COORD_LIMIT) as i32;
        clamped.saturating_add(offset)
    };
    (axis(point.x, offset.0), axis(point.y, offset.1))
}
