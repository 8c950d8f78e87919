//! Persisted user state
//!
//! Settings and backlight changes made on the device survive restarts. The
//! state is stored as postcard binary and rewritten whole on every change.

use core::fmt;
use std::io;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use g13_core::config::Settings;
use g13_core::traits::Rgb;

/// State file errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    Io(io::ErrorKind),
    /// File exists but does not decode
    Corrupt,
}

impl From<io::Error> for StateError {
    fn from(e: io::Error) -> Self {
        StateError::Io(e.kind())
    }
}

impl From<postcard::Error> for StateError {
    fn from(_: postcard::Error) -> Self {
        StateError::Corrupt
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Io(kind) => write!(f, "state file I/O: {}", kind),
            StateError::Corrupt => write!(f, "state file is corrupt"),
        }
    }
}

impl std::error::Error for StateError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub settings: Settings,
    /// Name of the profile loaded last
    pub last_profile: Option<String>,
    pub color: Rgb,
    pub mode: u8,
}

impl PersistedState {
    /// Read the state file; `Ok(None)` if it does not exist yet
    pub fn load(path: &Path) -> Result<Option<Self>, StateError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut state: PersistedState = postcard::from_bytes(&bytes)?;
        state.settings = state.settings.sanitized();
        debug!("Loaded {} bytes of state from {}", bytes.len(), path.display());
        Ok(Some(state))
    }

    /// Write the state file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let bytes = postcard::to_allocvec(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        debug!("Saved {} bytes of state to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g13_core::config::{ClockFormat, StickSensitivity};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("g13d-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("state.bin");
        let state = PersistedState {
            settings: Settings {
                clock_format: ClockFormat::H12,
                stick_sensitivity: StickSensitivity::Low,
                idle_timeout_s: 300,
                ..Settings::default()
            },
            last_profile: Some("gaming".into()),
            color: Rgb::new(0, 128, 255),
            mode: 3,
        };

        state.save(&path).unwrap();
        let loaded = PersistedState::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(PersistedState::load(&temp_path("missing.bin")), Ok(None));
    }

    #[test]
    fn test_corrupt_file() {
        let path = temp_path("corrupt.bin");
        std::fs::write(&path, [0xFF]).unwrap();
        let result = PersistedState::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(result, Err(StateError::Corrupt));
    }
}
