//! Display sink trait
//!
//! Defines where finished frames go. The canvas never talks to hardware
//! itself.

use g13_protocol::FRAMEBUFFER_SIZE;

/// Display sink errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Write to the device failed
    Communication,
    /// Device is gone
    Disconnected,
    /// Packet buffer too small
    BufferTooSmall,
}

impl From<g13_protocol::LcdError> for DisplayError {
    fn from(_: g13_protocol::LcdError) -> Self {
        DisplayError::BufferTooSmall
    }
}

/// Receiver of complete frames
///
/// Implementations frame the bytes for their transport (the G13 wants a
/// 32-byte header in front) and push them out in one write.
pub trait DisplaySink {
    /// Write one frame
    fn write_frame(&mut self, frame: &[u8; FRAMEBUFFER_SIZE]) -> Result<(), DisplayError>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn write_frame(&mut self, frame: &[u8; FRAMEBUFFER_SIZE]) -> Result<(), DisplayError> {
        (**self).write_frame(frame)
    }
}
