//! Report decoding
//!
//! Turns one raw input report into a [`ButtonState`] and compares
//! consecutive states.

use crate::buttons::{ButtonId, ButtonSet};
use crate::layout::ButtonLayout;

/// Stick axis value at rest
pub const STICK_CENTER: u8 = 128;

/// Errors that can occur while decoding a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Report is shorter than the layout requires
    Malformed { len: usize, required: usize },
}

/// Snapshot of the device decoded from a single report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Buttons held down
    pub pressed: ButtonSet,
    /// Stick X (0-255, 128 = center)
    pub stick_x: u8,
    /// Stick Y (0-255, 128 = center)
    pub stick_y: u8,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            pressed: ButtonSet::EMPTY,
            stick_x: STICK_CENTER,
            stick_y: STICK_CENTER,
        }
    }
}

/// Buttons that changed between two states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDelta {
    /// Absent before, present now
    pub pressed: ButtonSet,
    /// Present before, absent now
    pub released: ButtonSet,
}

impl ButtonDelta {
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }
}

impl ButtonState {
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.pressed.contains(button)
    }

    /// Compare two states
    pub fn diff(previous: &ButtonState, current: &ButtonState) -> ButtonDelta {
        ButtonDelta {
            pressed: current.pressed.difference(&previous.pressed),
            released: previous.pressed.difference(&current.pressed),
        }
    }
}

impl ButtonLayout {
    /// Decode a raw report
    ///
    /// Fails if the report is shorter than `min_len` or than any offset the
    /// table points at. Bits not listed in the table (or listed as reserved)
    /// are ignored.
    pub fn decode(&self, raw: &[u8]) -> Result<ButtonState, ReportError> {
        if raw.len() < self.min_len {
            return Err(ReportError::Malformed {
                len: raw.len(),
                required: self.min_len,
            });
        }

        let byte_at = |offset: usize| {
            raw.get(offset).copied().ok_or(ReportError::Malformed {
                len: raw.len(),
                required: offset + 1,
            })
        };

        let mut pressed = ButtonSet::new();
        for entry in self.buttons {
            let byte = byte_at(entry.byte)? & self.keep_mask(entry.byte);
            let mask = 1u8.checked_shl(u32::from(entry.bit)).unwrap_or(0);
            if byte & mask != 0 {
                pressed.insert(entry.button);
            }
        }

        Ok(ButtonState {
            pressed,
            stick_x: byte_at(self.stick_x)?,
            stick_y: byte_at(self.stick_y)?,
        })
    }
}

/// Decode with the retail G13 layout
pub fn decode(raw: &[u8]) -> Result<ButtonState, ReportError> {
    ButtonLayout::G13.decode(raw)
}
