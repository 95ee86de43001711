//! First-person view drawing
//!
//! Turns a `ViewBuffer` into pixels: one centered vertical slice per column
//! over a flat background.

use super::framebuffer::Framebuffer;
use super::palette;
use crate::sim::{ViewBuffer, WallSide, slice_span};

/// Draw every column slice into `fb`
///
/// Columns beyond the framebuffer width are dropped; missing columns stay
/// background.
pub fn draw_view(fb: &mut Framebuffer, view: &ViewBuffer) {
    fb.clear(palette::VIEW_BACKGROUND);
    let view_height = fb.height() as u32;

    for (x, column) in view.columns.iter().enumerate().take(fb.width()) {
        let Some((top, bottom)) = slice_span(column.height, view_height) else {
            continue;
        };
        let color = match column.side {
            Some(WallSide::Horizontal) => palette::WALL_SHADED,
            _ => palette::WALL,
        };
        fb.vline(x as i32, top as i32, bottom as i32, color);
    }
}
