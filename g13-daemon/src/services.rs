//! Runtime implementation of the screen capabilities
//!
//! Owned by the UI task. Profiles and macros come from the config file;
//! settings, the loaded profile, mode and backlight are kept in memory and
//! written to the state file when they change.

use core::sync::atomic::Ordering;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use g13_core::config::Settings;
use g13_core::traits::{
    Effect, LedControl, MacroSource, ProfileSource, Rgb, ServiceError, SettingsStore,
    StatusSource, WallClock,
};

use crate::channels::{ACTIVE_PROFILE, KEY_COUNT, STICK_THRESHOLD};
use crate::config::{DaemonConfig, PersistedState, ProfileConfig};

/// Profiles tried, in order, when nothing was loaded before
const PREFERRED_PROFILES: [&str; 2] = ["default", "example"];

const SECONDS_PER_DAY: i64 = 86_400;

pub struct DaemonServices {
    started: Instant,
    utc_offset_s: i64,
    profiles: Vec<ProfileConfig>,
    macros: Vec<String>,
    active: Option<usize>,
    mode: u8,
    color: Rgb,
    brightness: u8,
    effect: Option<Effect>,
    led_on: bool,
    settings: Settings,
    /// Stick dead zone pinned by the config; sensitivity changes are then
    /// not forwarded
    pinned_threshold: bool,
    state_file: Option<PathBuf>,
    unsaved: bool,
}

impl DaemonServices {
    pub fn new(config: &DaemonConfig, persisted: Option<PersistedState>) -> Self {
        let mut services = Self {
            started: Instant::now(),
            utc_offset_s: i64::from(config.clock.utc_offset_minutes) * 60,
            profiles: config.profiles.clone(),
            macros: config.macros.clone(),
            active: None,
            mode: 1,
            color: Rgb::WHITE,
            brightness: config.settings.led_brightness,
            effect: None,
            led_on: true,
            settings: config.settings,
            pinned_threshold: config.input.threshold.is_some(),
            state_file: config.state_file.clone(),
            unsaved: false,
        };

        let last_profile = persisted.as_ref().and_then(|state| state.last_profile.as_deref());
        if let Some(index) = services.initial_profile(last_profile) {
            services.activate(index);
        }

        if let Some(state) = persisted {
            services.settings = state.settings;
            services.brightness = state.settings.led_brightness;
            services.color = state.color;
            services.mode = state.mode.clamp(1, 3);
        }

        services
    }

    /// Last loaded profile if it still exists, else the first preferred
    /// name, else the first profile
    fn initial_profile(&self, last: Option<&str>) -> Option<usize> {
        let find = |name: &str| self.profiles.iter().position(|p| p.name == name);

        last.and_then(find)
            .or_else(|| PREFERRED_PROFILES.iter().find_map(|&name| find(name)))
            .or_else(|| (!self.profiles.is_empty()).then_some(0))
    }

    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        if let Some(color) = self.profiles[index].color() {
            self.color = color;
            self.led_on = true;
        }
        ACTIVE_PROFILE.signal(index);
        info!("Profile '{}' active", self.profiles[index].name);
    }

    pub fn is_led_on(&self) -> bool {
        self.led_on
    }

    /// True if a change has not been written yet
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Snapshot of everything persisted
    pub fn state(&self) -> PersistedState {
        PersistedState {
            settings: self.settings,
            last_profile: self.active_profile_name().map(String::from),
            color: self.color,
            mode: self.mode,
        }
    }

    /// Write the state file if anything changed since the last save
    ///
    /// Called once per UI tick, so a burst of preview changes costs one
    /// write.
    pub fn save_if_changed(&mut self) {
        if !self.unsaved {
            return;
        }
        self.unsaved = false;

        if let Some(path) = &self.state_file {
            if let Err(e) = self.state().save(path) {
                warn!("Failed to save state to {}: {}", path.display(), e);
            }
        }
    }
}

impl ProfileSource for DaemonServices {
    fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    fn profile_name(&self, index: usize) -> Option<&str> {
        self.profiles.get(index).map(|p| p.name.as_str())
    }

    fn active_profile(&self) -> Option<usize> {
        self.active
    }

    fn load_profile(&mut self, index: usize) -> Result<(), ServiceError> {
        if index >= self.profiles.len() {
            return Err(ServiceError::NotFound);
        }
        self.activate(index);
        self.unsaved = true;
        Ok(())
    }

    fn mode(&self) -> u8 {
        self.mode
    }

    fn set_mode(&mut self, mode: u8) {
        self.mode = mode.clamp(1, 3);
        self.unsaved = true;
        info!("Mode M{}", self.mode);
    }
}

impl MacroSource for DaemonServices {
    fn macro_count(&self) -> usize {
        self.macros.len()
    }

    fn macro_name(&self, index: usize) -> Option<&str> {
        self.macros.get(index).map(String::as_str)
    }
}

impl LedControl for DaemonServices {
    fn color(&self) -> Rgb {
        self.color
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.led_on = true;
        self.unsaved = true;
        debug!("Backlight color {}", color.to_hex());
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, percent: u8) {
        self.brightness = percent.min(100);
        self.settings.led_brightness = self.brightness;
        self.unsaved = true;
        debug!("Backlight brightness {}%", self.brightness);
    }

    fn effect(&self) -> Option<Effect> {
        self.effect
    }

    fn start_effect(&mut self, effect: Effect) {
        self.effect = Some(effect);
        self.led_on = true;
        info!("Backlight effect {}", effect.name());
    }

    fn stop_effect(&mut self) {
        if let Some(effect) = self.effect.take() {
            info!("Backlight effect {} stopped", effect.name());
        }
    }

    fn off(&mut self) {
        self.effect = None;
        self.led_on = false;
        info!("Backlight off");
    }
}

impl SettingsStore for DaemonServices {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn update_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        if settings == self.settings {
            return;
        }

        if settings.stick_sensitivity != self.settings.stick_sensitivity && !self.pinned_threshold {
            let threshold = settings.stick_sensitivity.threshold();
            debug!("Stick dead zone now {}", threshold);
            STICK_THRESHOLD.signal(threshold);
        }
        self.brightness = settings.led_brightness;
        self.settings = settings;
        self.unsaved = true;
    }
}

impl StatusSource for DaemonServices {
    fn uptime_s(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn key_count(&self) -> u32 {
        KEY_COUNT.load(Ordering::Relaxed)
    }

    fn wall_clock(&self) -> Option<WallClock> {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        let secs = i64::try_from(since_epoch.as_secs()).ok()?;
        civil_from_unix(secs + self.utc_offset_s)
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Break a Unix timestamp down into calendar fields (proleptic Gregorian)
pub fn civil_from_unix(secs: i64) -> Option<WallClock> {
    let days = secs.div_euclid(SECONDS_PER_DAY);
    let rem = secs.rem_euclid(SECONDS_PER_DAY);

    // Shift the epoch to 0000-03-01 so leap days fall at the end of a year
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    Some(WallClock {
        year: u16::try_from(year).ok()?,
        month: month as u8,
        day: day as u8,
        // 1970-01-01 was a Thursday
        weekday: (days + 3).rem_euclid(7) as u8,
        hour: (rem / 3_600) as u8,
        minute: (rem % 3_600 / 60) as u8,
        second: (rem % 60) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use g13_core::config::StickSensitivity;

    fn profile(name: &str, color: Option<&str>) -> ProfileConfig {
        ProfileConfig {
            color: color.map(String::from),
            ..ProfileConfig::new(name)
        }
    }

    fn config(names: &[&str]) -> DaemonConfig {
        DaemonConfig {
            profiles: names.iter().map(|&name| profile(name, None)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_civil_from_unix() {
        let epoch = civil_from_unix(0).unwrap();
        assert_eq!((epoch.year, epoch.month, epoch.day), (1970, 1, 1));
        assert_eq!(epoch.weekday, 3);

        let t = civil_from_unix(1_709_646_330).unwrap();
        assert_eq!((t.year, t.month, t.day), (2024, 3, 5));
        assert_eq!((t.hour, t.minute, t.second), (13, 45, 30));
        assert_eq!(t.weekday, 1);

        let leap = civil_from_unix(951_868_799).unwrap();
        assert_eq!((leap.year, leap.month, leap.day), (2000, 2, 29));
        assert_eq!((leap.hour, leap.minute, leap.second), (23, 59, 59));
    }

    #[test]
    fn test_initial_profile_order() {
        let services = DaemonServices::new(&config(&["work", "example", "default"]), None);
        assert_eq!(services.active_profile_name(), Some("default"));

        let services = DaemonServices::new(&config(&["work", "example"]), None);
        assert_eq!(services.active_profile_name(), Some("example"));

        let services = DaemonServices::new(&config(&["work", "play"]), None);
        assert_eq!(services.active_profile_name(), Some("work"));

        let services = DaemonServices::new(&config(&[]), None);
        assert_eq!(services.active_profile(), None);
    }

    #[test]
    fn test_persisted_state_wins() {
        let mut settings = Settings::default();
        settings.show_date = false;
        let state = PersistedState {
            settings,
            last_profile: Some("play".into()),
            color: Rgb::new(1, 2, 3),
            mode: 2,
        };

        let services = DaemonServices::new(&config(&["default", "play"]), Some(state));
        assert_eq!(services.active_profile_name(), Some("play"));
        assert_eq!(services.color(), Rgb::new(1, 2, 3));
        assert_eq!(services.mode(), 2);
        assert!(!services.settings().show_date);
        assert!(!services.has_unsaved_changes());
    }

    #[test]
    fn test_load_profile_applies_color() {
        let config = DaemonConfig {
            profiles: vec![profile("default", None), profile("red", Some("#FF0000"))],
            ..Default::default()
        };
        let mut services = DaemonServices::new(&config, None);
        assert_eq!(services.color(), Rgb::WHITE);

        services.load_profile(1).unwrap();
        assert_eq!(services.active_profile_name(), Some("red"));
        assert_eq!(services.color(), Rgb::new(255, 0, 0));
        assert!(services.has_unsaved_changes());

        assert_eq!(services.load_profile(5), Err(ServiceError::NotFound));
    }

    #[test]
    fn test_settings_change_marks_unsaved() {
        let mut services = DaemonServices::new(&DaemonConfig::default(), None);
        services.update_settings(*services.settings());
        assert!(!services.has_unsaved_changes());

        services.modify_settings(&mut |s: &mut Settings| s.led_brightness = 40);
        assert!(services.has_unsaved_changes());
        assert_eq!(services.brightness(), 40);
    }

    #[test]
    fn test_pinned_threshold_not_signalled() {
        let config = DaemonConfig {
            input: crate::config::InputSection {
                threshold: Some(60),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut services = DaemonServices::new(&config, None);
        STICK_THRESHOLD.reset();

        services.modify_settings(&mut |s: &mut Settings| s.stick_sensitivity = StickSensitivity::High);
        assert_eq!(STICK_THRESHOLD.try_take(), None);
        assert_eq!(services.settings().stick_sensitivity, StickSensitivity::High);
    }

    #[test]
    fn test_save_if_changed_writes_state() {
        let path = std::env::temp_dir().join(format!("g13d-services-{}.bin", std::process::id()));
        let config = DaemonConfig {
            state_file: Some(path.clone()),
            ..config(&["default"])
        };
        let mut services = DaemonServices::new(&config, None);
        services.set_mode(3);
        services.save_if_changed();
        assert!(!services.has_unsaved_changes());

        let saved = PersistedState::load(&path).unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(saved.mode, 3);
        assert_eq!(saved.last_profile.as_deref(), Some("default"));
    }

    #[test]
    fn test_led_off_and_effects() {
        let mut services = DaemonServices::new(&DaemonConfig::default(), None);
        services.start_effect(Effect::Pulse);
        assert_eq!(services.effect(), Some(Effect::Pulse));
        services.off();
        assert!(!services.is_led_on());
        assert_eq!(services.effect(), None);
        services.set_color(Rgb::new(0, 0, 255));
        assert!(services.is_led_on());
    }
}
