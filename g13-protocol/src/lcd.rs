//! LCD packet framing
//!
//! The G13 LCD takes one 992-byte interrupt transfer per frame:
//! ```text
//! ┌────────────────────────┬──────────────────────────────┐
//! │ HEADER (0x03, 0 x 31)  │ FRAMEBUFFER                  │
//! │ 32B                    │ 960B (160 cols x 6 blocks)   │
//! └────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Framebuffer layout: byte `x + (y / 8) * 160` holds the 8 vertical pixels
//! of column `x` in row block `y / 8`, least significant bit on top. The
//! last block carries 3 visible rows and 5 rows of padding.

/// Visible width in pixels
pub const LCD_WIDTH: usize = 160;

/// Visible height in pixels
pub const LCD_HEIGHT: usize = 43;

/// Number of 8-row blocks in the framebuffer
pub const LCD_ROW_BLOCKS: usize = 6;

/// Framebuffer size in bytes
pub const FRAMEBUFFER_SIZE: usize = LCD_WIDTH * LCD_ROW_BLOCKS;

/// Header length in bytes
pub const LCD_HEADER_SIZE: usize = 32;

/// First header byte
pub const LCD_COMMAND: u8 = 0x03;

/// Complete packet length
pub const LCD_PACKET_SIZE: usize = LCD_HEADER_SIZE + FRAMEBUFFER_SIZE;

/// Errors that can occur while building an LCD packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Framebuffer is not exactly [`FRAMEBUFFER_SIZE`] bytes
    FramebufferSize(usize),
    /// Output buffer is too small for a packet
    BufferTooSmall,
}

/// Encode a framebuffer into an LCD packet
///
/// Returns the number of bytes written
pub fn encode_packet(framebuffer: &[u8], out: &mut [u8]) -> Result<usize, LcdError> {
    if framebuffer.len() != FRAMEBUFFER_SIZE {
        return Err(LcdError::FramebufferSize(framebuffer.len()));
    }
    if out.len() < LCD_PACKET_SIZE {
        return Err(LcdError::BufferTooSmall);
    }

    out[..LCD_HEADER_SIZE].fill(0);
    out[0] = LCD_COMMAND;
    out[LCD_HEADER_SIZE..LCD_PACKET_SIZE].copy_from_slice(framebuffer);

    Ok(LCD_PACKET_SIZE)
}

/// Byte index and bit for a pixel, or `None` outside the visible area
pub fn pixel_position(x: usize, y: usize) -> Option<(usize, u8)> {
    if x >= LCD_WIDTH || y >= LCD_HEIGHT {
        return None;
    }
    Some((x + (y / 8) * LCD_WIDTH, (y % 8) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(FRAMEBUFFER_SIZE, 960);
        assert_eq!(LCD_PACKET_SIZE, 992);
        assert!(LCD_ROW_BLOCKS * 8 >= LCD_HEIGHT);
    }

    #[test]
    fn test_encode_packet() {
        let mut framebuffer = [0u8; FRAMEBUFFER_SIZE];
        framebuffer[0] = 0xAB;
        framebuffer[FRAMEBUFFER_SIZE - 1] = 0xCD;

        let mut out = [0xFFu8; LCD_PACKET_SIZE];
        let len = encode_packet(&framebuffer, &mut out).unwrap();

        assert_eq!(len, LCD_PACKET_SIZE);
        assert_eq!(out[0], LCD_COMMAND);
        assert!(out[1..LCD_HEADER_SIZE].iter().all(|&b| b == 0));
        assert_eq!(out[LCD_HEADER_SIZE], 0xAB);
        assert_eq!(out[LCD_PACKET_SIZE - 1], 0xCD);
    }

    #[test]
    fn test_encode_rejects_wrong_size() {
        let mut out = [0u8; LCD_PACKET_SIZE];
        assert_eq!(
            encode_packet(&[0u8; 100], &mut out),
            Err(LcdError::FramebufferSize(100))
        );

        let mut small = [0u8; 64];
        assert_eq!(
            encode_packet(&[0u8; FRAMEBUFFER_SIZE], &mut small),
            Err(LcdError::BufferTooSmall)
        );
    }

    #[test]
    fn test_pixel_position() {
        assert_eq!(pixel_position(0, 0), Some((0, 0)));
        assert_eq!(pixel_position(0, 7), Some((0, 7)));
        assert_eq!(pixel_position(0, 8), Some((160, 0)));
        assert_eq!(pixel_position(159, 42), Some((159 + 5 * 160, 2)));
        assert_eq!(pixel_position(160, 0), None);
        assert_eq!(pixel_position(0, 43), None);
    }
}
