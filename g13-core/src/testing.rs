//! In-memory services for unit tests

use heapless::Vec;

use crate::config::Settings;
use crate::traits::{
    Effect, LedControl, MacroSource, ProfileSource, Rgb, ServiceError, SettingsStore,
    StatusSource, WallClock,
};

#[derive(Debug, Clone)]
pub struct MockServices {
    pub profiles: Vec<&'static str, 16>,
    pub active: Option<usize>,
    pub mode: u8,
    pub macros: Vec<&'static str, 16>,
    pub color: Rgb,
    pub brightness: u8,
    pub effect: Option<Effect>,
    pub led_on: bool,
    pub settings: Settings,
    pub uptime_s: u64,
    pub keys: u32,
    pub clock: Option<WallClock>,
    /// Indices passed to `load_profile`, in call order
    pub loaded: Vec<usize, 16>,
    /// Every brightness written, in call order
    pub brightness_writes: Vec<u8, 32>,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            active: None,
            mode: 1,
            macros: Vec::new(),
            color: Rgb::WHITE,
            brightness: 100,
            effect: None,
            led_on: true,
            settings: Settings::default(),
            uptime_s: 0,
            keys: 0,
            clock: Some(WallClock {
                year: 2024,
                month: 1,
                day: 15,
                weekday: 0,
                hour: 9,
                minute: 30,
                second: 0,
            }),
            loaded: Vec::new(),
            brightness_writes: Vec::new(),
        }
    }
}

impl MockServices {
    pub fn with_profiles(names: &[&'static str]) -> Self {
        let mut services = Self::default();
        for &name in names {
            let _ = services.profiles.push(name);
        }
        if !names.is_empty() {
            services.active = Some(0);
        }
        services
    }
}

impl ProfileSource for MockServices {
    fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    fn profile_name(&self, index: usize) -> Option<&str> {
        self.profiles.get(index).copied()
    }

    fn active_profile(&self) -> Option<usize> {
        self.active
    }

    fn load_profile(&mut self, index: usize) -> Result<(), ServiceError> {
        if index >= self.profiles.len() {
            return Err(ServiceError::NotFound);
        }
        let _ = self.loaded.push(index);
        self.active = Some(index);
        Ok(())
    }

    fn mode(&self) -> u8 {
        self.mode
    }

    fn set_mode(&mut self, mode: u8) {
        self.mode = mode;
    }
}

impl MacroSource for MockServices {
    fn macro_count(&self) -> usize {
        self.macros.len()
    }

    fn macro_name(&self, index: usize) -> Option<&str> {
        self.macros.get(index).copied()
    }
}

impl LedControl for MockServices {
    fn color(&self) -> Rgb {
        self.color
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.led_on = true;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, percent: u8) {
        self.brightness = percent;
        let _ = self.brightness_writes.push(percent);
    }

    fn effect(&self) -> Option<Effect> {
        self.effect
    }

    fn start_effect(&mut self, effect: Effect) {
        self.effect = Some(effect);
    }

    fn stop_effect(&mut self) {
        self.effect = None;
    }

    fn off(&mut self) {
        self.effect = None;
        self.led_on = false;
    }
}

impl SettingsStore for MockServices {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}

impl StatusSource for MockServices {
    fn uptime_s(&self) -> u64 {
        self.uptime_s
    }

    fn key_count(&self) -> u32 {
        self.keys
    }

    fn wall_clock(&self) -> Option<WallClock> {
        self.clock
    }

    fn version(&self) -> &str {
        "0.1.0"
    }
}
