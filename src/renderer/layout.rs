//! Display rectangle layout
//!
//! The view is rendered at a fixed internal resolution and stretched onto the
//! screen at its own aspect ratio. With the debug overlay on, the view takes
//! the right half of the screen and the overhead map the left half.

/// Integer screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Where the view lands on a `screen_width` x `screen_height` screen
pub fn view_display_rect(
    screen_width: i32,
    screen_height: i32,
    aspect_ratio: f32,
    debug_overlay: bool,
) -> Rect {
    if debug_overlay {
        let w = screen_width / 2;
        let h = (w as f32 / aspect_ratio).round() as i32;
        return Rect::new(screen_width / 2, (screen_height - h) / 2, w, h);
    }

    // Letterbox first, pillarbox when the screen is too wide
    let proposed_height = (screen_width as f32 / aspect_ratio).round() as i32;
    if proposed_height <= screen_height {
        Rect::new(
            0,
            (screen_height - proposed_height) / 2,
            screen_width,
            proposed_height,
        )
    } else {
        let proposed_width = (screen_height as f32 * aspect_ratio).round() as i32;
        Rect::new(
            (screen_width - proposed_width) / 2,
            0,
            proposed_width,
            screen_height,
        )
    }
}
