//! Capability traits
//!
//! Screens never reach into the runtime directly. Everything they read or
//! change goes through these traits, which the daemon implements on one
//! services struct owned by the UI task.

pub mod led;
pub mod profile;
pub mod settings;
pub mod status;

pub use led::{Effect, LedControl, Rgb};
pub use profile::{MacroSource, ProfileSource, ServiceError};
pub use settings::SettingsStore;
pub use status::{StatusSource, WallClock};

/// Everything a screen may use
pub trait Services: ProfileSource + MacroSource + LedControl + SettingsStore + StatusSource {}

// Blanket implementation for all types providing every capability
impl<T> Services for T where
    T: ProfileSource + MacroSource + LedControl + SettingsStore + StatusSource + ?Sized
{
}
