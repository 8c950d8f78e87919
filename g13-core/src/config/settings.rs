//! User settings
//!
//! Everything the Settings menus can change. The runtime persists this
//! struct whenever it changes.

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Idle timeout choices offered by the Timeout menu (seconds, 0 = never)
pub const IDLE_TIMEOUT_OPTIONS: [u16; 5] = [0, 15, 30, 60, 300];

/// Maximum LED brightness (percent)
pub const MAX_BRIGHTNESS: u8 = 100;

/// Clock display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockFormat {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "24h"))]
    H24,
    #[cfg_attr(feature = "serde", serde(rename = "12h"))]
    H12,
}

impl ClockFormat {
    pub fn label(self) -> &'static str {
        match self {
            ClockFormat::H24 => "24h",
            ClockFormat::H12 => "12h",
        }
    }
}

/// Thumbstick dead zone presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StickSensitivity {
    Low,
    #[default]
    Normal,
    High,
}

impl StickSensitivity {
    /// Dead zone radius around the stick center
    ///
    /// Higher sensitivity means a smaller dead zone.
    pub fn threshold(self) -> u8 {
        match self {
            StickSensitivity::Low => 70,
            StickSensitivity::Normal => 50,
            StickSensitivity::High => 30,
        }
    }

    /// Next preset in the Low -> Normal -> High -> Low cycle
    pub fn next(self) -> Self {
        match self {
            StickSensitivity::Low => StickSensitivity::Normal,
            StickSensitivity::Normal => StickSensitivity::High,
            StickSensitivity::High => StickSensitivity::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StickSensitivity::Low => "Low",
            StickSensitivity::Normal => "Normal",
            StickSensitivity::High => "High",
        }
    }
}

/// User settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub clock_format: ClockFormat,
    pub show_seconds: bool,
    pub show_date: bool,
    /// Seconds without input before menus fall back to the idle screen
    /// (0 = never)
    pub idle_timeout_s: u16,
    pub stick_sensitivity: StickSensitivity,
    /// LED brightness in percent
    pub led_brightness: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clock_format: ClockFormat::H24,
            show_seconds: true,
            show_date: true,
            idle_timeout_s: 30,
            stick_sensitivity: StickSensitivity::Normal,
            led_brightness: MAX_BRIGHTNESS,
        }
    }
}

impl Settings {
    /// Clamp out-of-range values loaded from storage or config
    pub fn sanitized(mut self) -> Self {
        self.led_brightness = self.led_brightness.min(MAX_BRIGHTNESS);
        self
    }
}

/// Short form of an idle timeout: "Never", "15s", "5m"
pub fn format_timeout(seconds: u16) -> String<8> {
    let mut out = String::new();
    match seconds {
        0 => {
            let _ = out.push_str("Never");
        }
        s if s < 60 => {
            let _ = write!(out, "{}s", s);
        }
        s => {
            let _ = write!(out, "{}m", s / 60);
        }
    }
    out
}
