//! CPU framebuffer
//!
//! Pixels are packed `0x00RRGGBB` words, row-major. Every drawing call clips
//! to the buffer, so callers can pass coordinates that fall off-screen.

use super::layout::Rect;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split a packed pixel back into (r, g, b)
#[inline]
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw pixel bytes (native-endian words) for handing to a surface
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = (rect.x + rect.w).clamp(0, self.width as i32) as usize;
        let y1 = (rect.y + rect.h).clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    /// Vertical line from `top` to `bottom` inclusive
    pub fn vline(&mut self, x: i32, top: i32, bottom: i32, color: u32) {
        if x < 0 || x as usize >= self.width || self.height == 0 {
            return;
        }
        let top = top.max(0);
        let bottom = bottom.min(self.height as i32 - 1);
        for y in top..=bottom {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Bresenham line, end point included
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let (w, h) = (self.width as i32, self.height as i32);
        // Both ends past the same edge: nothing to plot
        let outside = (x0 < 0 && x1 < 0)
            || (y0 < 0 && y1 < 0)
            || (x0 >= w && x1 >= w)
            || (y0 >= h && y1 >= h);
        if outside {
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += sx;
            }
            if doubled <= dx {
                error += dx;
                y += sy;
            }
        }
    }

    /// Nearest-neighbour stretch of `src` into `dst` (clipped to this buffer)
    pub fn blit_scaled(&mut self, src: &Framebuffer, dst: Rect) {
        if dst.w <= 0 || dst.h <= 0 || src.width == 0 || src.height == 0 {
            return;
        }
        let x_start = dst.x.max(0);
        let y_start = dst.y.max(0);
        let x_end = (dst.x + dst.w).min(self.width as i32);
        let y_end = (dst.y + dst.h).min(self.height as i32);

        for y in y_start..y_end {
            let sy = ((y - dst.y) as usize * src.height) / dst.h as usize;
            let src_row = sy * src.width;
            let dst_row = y as usize * self.width;
            for x in x_start..x_end {
                let sx = ((x - dst.x) as usize * src.width) / dst.w as usize;
                self.pixels[dst_row + x as usize] = src.pixels[src_row + sx];
            }
        }
    }

    /// Binary PPM (P6) image of the buffer
    pub fn to_ppm(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len() * 3);
        out.extend_from_slice(header.as_bytes());
        for &pixel in &self.pixels {
            let (r, g, b) = unpack_rgb(pixel);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0x00FF0000;

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack_rgb(255, 0, 0), RED);
        assert_eq!(unpack_rgb(pack_rgb(1, 2, 3)), (1, 2, 3));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(Rect::new(-2, -2, 4, 4), RED);
        assert_eq!(fb.get(0, 0), Some(RED));
        assert_eq!(fb.get(1, 1), Some(RED));
        assert_eq!(fb.get(2, 2), Some(0));
        // Entirely off-screen is a no-op
        fb.fill_rect(Rect::new(10, 10, 5, 5), RED);
        assert_eq!(fb.pixels().iter().filter(|&&p| p == RED).count(), 4);
    }

    #[test]
    fn test_vline_inclusive_and_clipped() {
        let mut fb = Framebuffer::new(3, 5);
        fb.vline(1, -3, 2, RED);
        assert_eq!(fb.get(1, 0), Some(RED));
        assert_eq!(fb.get(1, 2), Some(RED));
        assert_eq!(fb.get(1, 3), Some(0));
        fb.vline(7, 0, 4, RED);
        fb.vline(-1, 0, 4, RED);
        assert_eq!(fb.pixels().iter().filter(|&&p| p == RED).count(), 3);
    }

    #[test]
    fn test_line_hits_both_ends() {
        let mut fb = Framebuffer::new(10, 10);
        fb.line(1, 1, 8, 4, RED);
        assert_eq!(fb.get(1, 1), Some(RED));
        assert_eq!(fb.get(8, 4), Some(RED));
        // Steep and reversed
        fb.line(5, 9, 3, 0, RED);
        assert_eq!(fb.get(5, 9), Some(RED));
        assert_eq!(fb.get(3, 0), Some(RED));
        // Off-screen pieces are dropped, not wrapped
        fb.line(-5, 0, 20, 0, RED);
        assert_eq!(fb.get(9, 0), Some(RED));
    }

    #[test]
    fn test_line_entirely_off_screen() {
        let mut fb = Framebuffer::new(10, 10);
        fb.line(i32::MAX / 4, 3, i32::MAX / 4 + 30, 5, RED);
        fb.line(-40, -1, 40, -3, RED);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_blit_scaled_doubles() {
        let mut src = Framebuffer::new(2, 1);
        src.set(1, 0, RED);
        let mut dst = Framebuffer::new(4, 2);
        dst.blit_scaled(&src, Rect::new(0, 0, 4, 2));
        assert_eq!(dst.pixels(), &[0, 0, RED, RED, 0, 0, RED, RED]);
    }

    #[test]
    fn test_bytes_and_ppm() {
        let mut fb = Framebuffer::new(2, 1);
        fb.clear(pack_rgb(10, 20, 30));
        assert_eq!(fb.as_bytes().len(), 8);
        let ppm = fb.to_ppm();
        assert!(ppm.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&ppm[ppm.len() - 3..], &[10, 20, 30]);
    }
}
