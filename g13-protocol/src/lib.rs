//! Logitech G13 wire formats
//!
//! This crate covers the two byte formats the keypad speaks:
//! - the 8-byte input report (buttons and thumbstick), decoded through an
//!   injectable [`ButtonLayout`] table
//! - the 992-byte LCD packet (32-byte header + 960-byte framebuffer)
//!
//! The button vocabulary ([`ButtonId`]) defined here is the one used by the
//! decoder, the navigation layer and profile mappings.

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod layout;
pub mod lcd;
pub mod report;

pub use buttons::{ButtonId, ButtonSet, BUTTON_COUNT};
pub use layout::{ButtonBit, ButtonLayout, LayoutError, G13_REPORT_LEN};
pub use lcd::{
    encode_packet, pixel_position, LcdError, FRAMEBUFFER_SIZE, LCD_COMMAND, LCD_HEIGHT,
    LCD_PACKET_SIZE, LCD_WIDTH,
};
pub use report::{decode, ButtonDelta, ButtonState, ReportError, STICK_CENTER};
