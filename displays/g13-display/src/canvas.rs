//! 1-bit drawing canvas
//!
//! Fixed 160x43 surface backed by the 960-byte framebuffer the LCD takes
//! on the wire. All coordinates are signed; anything outside the visible
//! area is clipped silently.

use g13_protocol::{pixel_position, FRAMEBUFFER_SIZE, LCD_HEIGHT, LCD_WIDTH};

use crate::font::Font;

/// Canvas width in pixels
pub const WIDTH: i32 = LCD_WIDTH as i32;

/// Canvas height in pixels
pub const HEIGHT: i32 = LCD_HEIGHT as i32;

/// Progress bar fill style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill {
    Solid,
    /// Checkerboard
    Dithered,
}

/// Monochrome framebuffer with drawing primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: [u8; FRAMEBUFFER_SIZE],
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a blank canvas
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAMEBUFFER_SIZE],
        }
    }

    /// All pixels off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// All pixels on
    pub fn fill(&mut self) {
        self.buffer.fill(0xFF);
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        pixel_position(x, y).map(|(index, bit)| (index, 1 << bit))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    pub fn hline(&mut self, x: i32, y: i32, width: i32, on: bool) {
        for i in 0..width.max(0) {
            self.set_pixel(x + i, y, on);
        }
    }

    pub fn vline(&mut self, x: i32, y: i32, height: i32, on: bool) {
        for i in 0..height.max(0) {
            self.set_pixel(x, y + i, on);
        }
    }

    /// Bresenham line, both endpoints included
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.set_pixel(x, y, on);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, filled: bool, on: bool) {
        if width <= 0 || height <= 0 {
            return;
        }
        if filled {
            for row in 0..height {
                self.hline(x, y + row, width, on);
            }
        } else {
            self.hline(x, y, width, on);
            self.hline(x, y + height - 1, width, on);
            self.vline(x, y, height, on);
            self.vline(x + width - 1, y, height, on);
        }
    }

    /// Bordered bar with `percent` (clamped to 0..=100) of the inner width
    /// filled
    pub fn progress_bar(&mut self, x: i32, y: i32, width: i32, height: i32, percent: u8, fill: Fill) {
        self.rect(x, y, width, height, false, true);

        let inner_width = (width - 2).max(0);
        let inner_height = (height - 2).max(0);
        let filled = i32::from(percent.min(100)) * inner_width / 100;

        match fill {
            Fill::Solid => self.rect(x + 1, y + 1, filled, inner_height, true, true),
            Fill::Dithered => {
                for py in 0..inner_height {
                    for px in 0..filled {
                        if (px + py) % 2 == 0 {
                            self.set_pixel(x + 1 + px, y + 1 + py, true);
                        }
                    }
                }
            }
        }
    }

    /// Draw text with the font's own spacing, returns the advance in pixels
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &Font, on: bool) -> i32 {
        self.draw_text_spaced(x, y, text, font, font.spacing, on)
    }

    /// Draw text with explicit spacing
    ///
    /// Glyphs are blitted column by column; only set glyph bits touch the
    /// canvas. Drawing stops once the cursor passes the right edge.
    pub fn draw_text_spaced(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: &Font,
        spacing: u8,
        on: bool,
    ) -> i32 {
        let advance = font.advance(spacing);
        let mut cursor = x;

        for ch in text.chars() {
            for (col, &bits) in font.glyph(ch).iter().enumerate() {
                let px = cursor + col as i32;
                if px >= WIDTH {
                    break;
                }
                for row in 0..font.height {
                    if bits & (1 << row) != 0 {
                        self.set_pixel(px, y + row as i32, on);
                    }
                }
            }

            cursor += advance;
            if cursor >= WIDTH {
                break;
            }
        }

        cursor - x
    }

    /// Width of `text` in pixels, counting spacing after every character
    pub fn text_width(text: &str, font: &Font, spacing: u8) -> i32 {
        text.chars().count() as i32 * font.advance(spacing)
    }

    /// Draw text centered horizontally, returns the starting x
    pub fn draw_text_centered(&mut self, y: i32, text: &str, font: &Font, on: bool) -> i32 {
        let width = Self::text_width(text, font, font.spacing);
        let x = ((WIDTH - width) / 2).max(0);
        self.draw_text(x, y, text, font, on);
        x
    }

    /// Draw text so that it ends at `right` (exclusive), returns the
    /// starting x
    pub fn draw_text_right(&mut self, right: i32, y: i32, text: &str, font: &Font, on: bool) -> i32 {
        // The trailing gap after the last glyph is not part of the ink.
        let width = Self::text_width(text, font, font.spacing) - font.spacing as i32;
        let x = (right - width).max(0);
        self.draw_text(x, y, text, font, on);
        x
    }

    /// Flip every pixel in the rectangle
    pub fn invert_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for py in y..y + height.max(0) {
            for px in x..x + width.max(0) {
                let current = self.get_pixel(px, py);
                self.set_pixel(px, py, !current);
            }
        }
    }

    /// Copy the lit pixels of `other` onto this canvas at an offset
    pub fn blit(&mut self, other: &Canvas, x: i32, y: i32) {
        for py in 0..HEIGHT {
            for px in 0..WIDTH {
                if other.get_pixel(px, py) {
                    self.set_pixel(x + px, y + py, true);
                }
            }
        }
    }

    /// Framebuffer in LCD byte order
    pub fn to_bytes(&self) -> &[u8; FRAMEBUFFER_SIZE] {
        &self.buffer
    }

    /// Load a framebuffer; longer input is truncated, shorter is zero-padded
    pub fn from_bytes(&mut self, data: &[u8]) {
        let len = data.len().min(FRAMEBUFFER_SIZE);
        self.buffer[..len].copy_from_slice(&data[..len]);
        self.buffer[len..].fill(0);
    }

    /// Number of lit visible pixels
    pub fn pixels_on(&self) -> usize {
        let mut count = 0;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if self.get_pixel(x, y) {
                    count += 1;
                }
            }
        }
        count
    }
}
