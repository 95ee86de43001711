//! Software rendering module
//!
//! The view is drawn into a fixed-size internal framebuffer and stretched onto
//! the screen buffer. With the debug overlay on, the overhead map fills the
//! left half of the screen.

pub mod framebuffer;
pub mod layout;
pub mod overhead;
pub mod view;

pub use framebuffer::{Framebuffer, pack_rgb, unpack_rgb};
pub use layout::{Rect, view_display_rect};
pub use overhead::draw_overhead;
pub use view::draw_view;

use crate::consts::MAP_OFFSET;
use crate::sim::{SimState, ViewBuffer, cast_column};

/// Colors used by the renderer
pub mod palette {
    pub const VIEW_BACKGROUND: u32 = 0x0000_00FF;
    pub const WALL: u32 = 0x0000_FF00;
    /// Walls struck on a horizontal grid line
    pub const WALL_SHADED: u32 = 0x0000_B400;

    pub const SCREEN: u32 = 0x0000_0000;
    pub const SCREEN_DEBUG: u32 = 0x0040_4040;

    pub const MAP_WALL: u32 = 0x00FF_FFFF;
    pub const MAP_FLOOR: u32 = 0x0000_0000;
    pub const MAP_PLAYER: u32 = 0x00FF_FF00;
    /// Central ray and its hit marker
    pub const MAP_RAY: u32 = 0x00FF_4040;
}

/// Owns the internal view target and the screen-sized output
pub struct SoftwareRenderer {
    view: Framebuffer,
    screen: Framebuffer,
}

impl SoftwareRenderer {
    pub fn new(
        view_width: usize,
        view_height: usize,
        screen_width: usize,
        screen_height: usize,
    ) -> Self {
        log::info!(
            "Software renderer: view {}x{}, screen {}x{}",
            view_width,
            view_height,
            screen_width,
            screen_height
        );
        Self {
            view: Framebuffer::new(view_width, view_height),
            screen: Framebuffer::new(screen_width, screen_height),
        }
    }

    pub fn screen(&self) -> &Framebuffer {
        &self.screen
    }

    /// Compose one full frame and return the screen buffer
    pub fn render(&mut self, state: &SimState, buffer: &ViewBuffer) -> &Framebuffer {
        draw_view(&mut self.view, buffer);

        if state.debug_overlay {
            self.screen.clear(palette::SCREEN_DEBUG);
            let center = cast_column(&state.pose, &state.grid, 0.0);
            draw_overhead(
                &mut self.screen,
                &state.grid,
                &state.pose,
                MAP_OFFSET,
                Some(&center),
            );
        } else {
            self.screen.clear(palette::SCREEN);
        }

        let aspect = self.view.width() as f32 / self.view.height().max(1) as f32;
        let rect = view_display_rect(
            self.screen.width() as i32,
            self.screen.height() as i32,
            aspect,
            state.debug_overlay,
        );
        self.screen.blit_scaled(&self.view, rect);
        &self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MotionSettings;
    use crate::sim::{Grid, Pose, ProjectionConfig, render_view};
    use glam::Vec2;

    fn state(debug_overlay: bool) -> SimState {
        let mut state = SimState::new(
            Grid::default(),
            Pose::new(Vec2::new(224.0, 480.0), 90.0),
            MotionSettings::default(),
        );
        state.debug_overlay = debug_overlay;
        state
    }

    #[test]
    fn test_render_without_overlay_fills_screen() {
        let state = state(false);
        let buffer = render_view(&state.pose, &state.grid, &ProjectionConfig::default());
        let mut renderer = SoftwareRenderer::new(320, 180, 640, 360);
        let screen = renderer.render(&state, &buffer);

        // Exact aspect: the top-left corner is view background (sky)
        assert_eq!(screen.get(0, 0), Some(palette::VIEW_BACKGROUND));
        // Center column hits the north wall 416 away: a short green slice
        let center = screen.get(320, 180).unwrap();
        assert!(center == palette::WALL || center == palette::WALL_SHADED);
    }

    #[test]
    fn test_render_with_overlay_splits_screen() {
        let state = state(true);
        let buffer = render_view(&state.pose, &state.grid, &ProjectionConfig::default());
        let mut renderer = SoftwareRenderer::new(320, 180, 1280, 720);
        let screen = renderer.render(&state, &buffer);

        // Left half: overhead map over the grey debug background
        assert_eq!(screen.get(0, 0), Some(palette::SCREEN_DEBUG));
        assert_eq!(screen.get(11, 11), Some(palette::MAP_WALL));
        assert_eq!(screen.get(234, 490), Some(palette::MAP_PLAYER));
        // Right half: the view, letterboxed vertically
        assert_eq!(screen.get(1279, 0), Some(palette::SCREEN_DEBUG));
        assert_eq!(screen.get(1279, 180), Some(palette::VIEW_BACKGROUND));
    }
}
