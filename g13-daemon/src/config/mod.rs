//! Daemon configuration
//!
//! Read once at startup from a TOML file. Every section is optional and a
//! missing file means defaults throughout. User settings changed through
//! the menus are persisted separately (see [`state`]) and override the
//! `[settings]` section on the next start.

pub mod state;

use core::fmt;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use embassy_time::Duration;
use log::{debug, info, warn};
use serde::Deserialize;

use g13_core::config::{
    InputConfig, Settings, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS,
};
use g13_core::keymap::{KeyCode, Keymap, KeymapError};
use g13_core::traits::Rgb;
use g13_protocol::{ButtonId, ButtonLayout, LayoutError};

pub use state::{PersistedState, StateError};

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "G13D_CONFIG";

/// Config path used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "/etc/g13d.toml";

/// Bound on a single transport read (ms)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// LCD refresh rate
pub const DEFAULT_FPS: u32 = 20;

/// Highest accepted refresh rate
pub const MAX_FPS: u32 = 60;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read
    Io(io::ErrorKind),
    /// TOML did not match the expected structure
    Parse(String),
    /// Button table is inconsistent
    Layout(LayoutError),
    /// A profile's key binding names an unknown button or key
    Binding(String),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e.kind())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        ConfigError::Layout(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(kind) => write!(f, "cannot read config: {}", kind),
            ConfigError::Parse(msg) => write!(f, "invalid config: {}", msg),
            ConfigError::Layout(e) => write!(f, "invalid button layout: {:?}", e),
            ConfigError::Binding(msg) => write!(f, "invalid key binding: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// `/dev/hidrawN` of the G13; simulation when absent
    pub hidraw: Option<PathBuf>,
    /// Stop after this long (ms); run until killed when absent
    pub run_for_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputSection {
    pub read_timeout_ms: u64,
    /// Fixed stick dead zone; follows the sensitivity setting when absent
    pub threshold: Option<u8>,
    pub repeat_delay_ms: u32,
    pub repeat_interval_ms: u32,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            threshold: None,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl InputSection {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(1))
    }

    /// Navigator parameters for the given settings
    pub fn input_config(&self, settings: &Settings) -> InputConfig {
        InputConfig {
            threshold: self
                .threshold
                .unwrap_or_else(|| settings.stick_sensitivity.threshold()),
            repeat_delay_ms: self.repeat_delay_ms,
            repeat_interval_ms: self.repeat_interval_ms,
            ..InputConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

impl RenderConfig {
    pub fn fps(&self) -> u32 {
        self.fps.clamp(1, MAX_FPS)
    }

    /// Ticker period for the UI task
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Local time offset from UTC
    pub utc_offset_minutes: i32,
}

/// Keys one G-key sends
///
/// Accepted forms: `G1 = "KEY_1"`, `G2 = ["KEY_LEFTCTRL", "KEY_B"]` and
/// `G3 = { keys = ["KEY_LEFTCTRL", "KEY_C"], label = "Copy" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Single(String),
    Combo(Vec<String>),
    Labeled {
        keys: Vec<String>,
        #[serde(default)]
        label: Option<String>,
    },
}

impl KeySpec {
    pub fn key_names(&self) -> &[String] {
        match self {
            KeySpec::Single(key) => core::slice::from_ref(key),
            KeySpec::Combo(keys) | KeySpec::Labeled { keys, .. } => keys,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    /// Backlight color applied when the profile loads (`#RRGGBB`)
    #[serde(default)]
    pub color: Option<String>,
    /// G-key bindings, keyed by button name
    #[serde(default)]
    pub keys: BTreeMap<String, KeySpec>,
}

impl ProfileConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            color: None,
            keys: BTreeMap::new(),
        }
    }

    /// Parsed backlight color; `None` if absent or malformed
    pub fn color(&self) -> Option<Rgb> {
        self.color.as_deref().and_then(parse_hex_color)
    }

    /// Build the profile's keymap
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let mut keymap = Keymap::new();
        for (button_name, spec) in &self.keys {
            let button = ButtonId::from_name(button_name).ok_or_else(|| {
                ConfigError::Binding(format!("{}: unknown button {}", self.name, button_name))
            })?;

            let mut codes = Vec::with_capacity(spec.key_names().len());
            for key_name in spec.key_names() {
                let code = KeyCode::from_name(key_name).ok_or_else(|| {
                    ConfigError::Binding(format!("{}: unknown key {}", self.name, key_name))
                })?;
                codes.push(code);
            }

            keymap.bind(button, &codes).map_err(|e| {
                let reason = match e {
                    KeymapError::NotProgrammable(_) => "only G-keys can be bound",
                    KeymapError::ComboTooLong(_) => "too many keys",
                };
                ConfigError::Binding(format!("{} {}: {}", self.name, button_name, reason))
            })?;
        }
        Ok(keymap)
    }
}

/// Complete daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub device: DeviceConfig,
    pub input: InputSection,
    pub render: RenderConfig,
    pub clock: ClockConfig,
    pub settings: Settings,
    pub profiles: Vec<ProfileConfig>,
    pub macros: Vec<String>,
    /// Where menu changes are persisted; nothing is saved when absent
    pub state_file: Option<PathBuf>,
}

impl DaemonConfig {
    /// Parse a TOML document
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config: DaemonConfig = toml::from_str(text)?;
        config.settings = config.settings.sanitized();
        Ok(config)
    }

    /// Check the parts that cannot be expressed in the TOML schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        ButtonLayout::G13.validate()?;
        for profile in &self.profiles {
            if profile.color.is_some() && profile.color().is_none() {
                warn!("Profile '{}': ignoring malformed color", profile.name);
            }
            profile.keymap()?;
        }
        Ok(())
    }

    /// One keymap per profile, in profile order
    ///
    /// A profile whose bindings do not parse gets an empty keymap;
    /// [`validate`](Self::validate) reports those at load time.
    pub fn keymaps(&self) -> Vec<Keymap> {
        self.profiles
            .iter()
            .map(|profile| profile.keymap().unwrap_or_default())
            .collect()
    }
}

/// Path from `$G13D_CONFIG`, else `/etc/g13d.toml`
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load(path: &Path) -> Result<DaemonConfig, ConfigError> {
    let config = match std::fs::read_to_string(path) {
        Ok(text) => {
            info!("Loading configuration from {}", path.display());
            DaemonConfig::parse(&text)?
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No config at {}, using defaults", path.display());
            DaemonConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// `#RRGGBB` or `RRGGBB`
pub fn parse_hex_color(text: &str) -> Option<Rgb> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn log_config_summary(config: &DaemonConfig) {
    match &config.device.hidraw {
        Some(path) => info!("Device: {}", path.display()),
        None => info!("Device: none (simulation)"),
    }
    debug!(
        "  input: timeout {} ms, repeat {}/{} ms",
        config.input.read_timeout_ms, config.input.repeat_delay_ms, config.input.repeat_interval_ms
    );
    debug!("  render: {} fps", config.render.fps());
    debug!("  {} profiles, {} macros", config.profiles.len(), config.macros.len());
    if let Some(path) = &config.state_file {
        debug!("  state file: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g13_core::config::{ClockFormat, StickSensitivity};

    const SAMPLE: &str = include_str!("../../g13d.toml");

    #[test]
    fn test_empty_config_is_default() {
        let config = DaemonConfig::parse("").unwrap();
        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.input.read_timeout_ms, 100);
        assert_eq!(config.render.fps(), 20);
        assert!(config.device.hidraw.is_none());
    }

    #[test]
    fn test_sample_config() {
        let config = DaemonConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.device.hidraw, Some(PathBuf::from("/dev/hidraw0")));
        assert_eq!(config.settings.clock_format, ClockFormat::H12);
        assert_eq!(config.settings.stick_sensitivity, StickSensitivity::High);
        assert_eq!(config.profiles.len(), 3);
        assert_eq!(config.profiles[0].name, "default");
        assert_eq!(config.profiles[1].color(), Some(Rgb::new(255, 0, 0)));
        assert_eq!(config.macros.len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn test_sample_key_bindings() {
        let config = DaemonConfig::parse(SAMPLE).unwrap();
        let keymap = config.profiles[1].keymap().unwrap();
        assert_eq!(keymap.combo(ButtonId::G1), &[KeyCode::from_name("KEY_1").unwrap()]);
        assert_eq!(
            keymap.combo(ButtonId::G2),
            &[
                KeyCode::from_name("KEY_LEFTCTRL").unwrap(),
                KeyCode::from_name("KEY_B").unwrap()
            ]
        );
        assert!(keymap.is_bound(ButtonId::G3));
        assert_eq!(config.keymaps().len(), 3);
    }

    #[test]
    fn test_bad_bindings_rejected() {
        let unknown_key = DaemonConfig::parse(
            r#"
            [[profiles]]
            name = "fps"
            keys = { G1 = "KEY_WARP" }
            "#,
        )
        .unwrap();
        assert!(matches!(unknown_key.validate(), Err(ConfigError::Binding(_))));

        let menu_button = DaemonConfig::parse(
            r#"
            [[profiles]]
            name = "fps"
            keys = { STICK = "KEY_SPACE" }
            "#,
        )
        .unwrap();
        assert!(matches!(menu_button.validate(), Err(ConfigError::Binding(_))));
        assert_eq!(menu_button.keymaps()[0].bound_count(), 0);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config = DaemonConfig::parse(
            r#"
            [settings]
            show_seconds = false
            led_brightness = 250
            "#,
        )
        .unwrap();
        assert!(!config.settings.show_seconds);
        assert_eq!(config.settings.idle_timeout_s, 30);
        // Clamped on load
        assert_eq!(config.settings.led_brightness, 100);
    }

    #[test]
    fn test_parse_error() {
        let result = DaemonConfig::parse("[render]\nfps = \"fast\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load(Path::new("/nonexistent/g13d.toml")).unwrap();
        assert_eq!(config, DaemonConfig::default());
    }

    #[test]
    fn test_input_config_follows_sensitivity() {
        let mut settings = Settings::default();
        settings.stick_sensitivity = StickSensitivity::Low;

        let section = InputSection::default();
        assert_eq!(section.input_config(&settings).threshold, 70);

        let fixed = InputSection {
            threshold: Some(42),
            ..Default::default()
        };
        assert_eq!(fixed.input_config(&settings).threshold, 42);
    }

    #[test]
    fn test_fps_clamped() {
        assert_eq!(RenderConfig { fps: 0 }.fps(), 1);
        assert_eq!(RenderConfig { fps: 500 }.fps(), 60);
        assert_eq!(RenderConfig::default().frame_period(), Duration::from_millis(50));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(parse_hex_color("#FF69B4"), Some(Rgb::new(255, 105, 180)));
        assert_eq!(parse_hex_color("00ff00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }
}
