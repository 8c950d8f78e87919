//! Input tuning

use g13_protocol::STICK_CENTER;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default dead zone radius around the stick center
pub const DEFAULT_STICK_THRESHOLD: u8 = 50;

/// Hold time before the first synthetic repeat (ms)
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 400;

/// Time between synthetic repeats (ms)
pub const DEFAULT_REPEAT_INTERVAL_MS: u32 = 150;

/// Stick and repeat parameters for the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Axis value at rest
    pub center: u8,
    /// Dead zone radius
    pub threshold: u8,
    pub repeat_delay_ms: u32,
    pub repeat_interval_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            center: STICK_CENTER,
            threshold: DEFAULT_STICK_THRESHOLD,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}
