//! Backlight control

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`
    pub fn to_hex(self) -> String<7> {
        let mut out = String::new();
        let _ = write!(out, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b);
        out
    }
}

/// Animated backlight effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Effect {
    Solid,
    Pulse,
    Rainbow,
    Fade,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::Solid => "Solid",
            Effect::Pulse => "Pulse",
            Effect::Rainbow => "Rainbow",
            Effect::Fade => "Fade",
        }
    }
}

/// Backlight controller
///
/// The effects engine itself lives outside this crate; screens only start,
/// stop and preview.
pub trait LedControl {
    fn color(&self) -> Rgb;

    fn set_color(&mut self, color: Rgb);

    /// Brightness in percent (0-100)
    fn brightness(&self) -> u8;

    fn set_brightness(&mut self, percent: u8);

    /// Running effect, if any
    fn effect(&self) -> Option<Effect>;

    fn start_effect(&mut self, effect: Effect);

    fn stop_effect(&mut self);

    /// Turn the backlight off
    fn off(&mut self);
}
