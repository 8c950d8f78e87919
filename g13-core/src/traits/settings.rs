//! Settings storage

use crate::config::Settings;

/// Owner of the user settings
///
/// Implementations decide when to persist; screens only read and replace
/// the whole struct.
pub trait SettingsStore {
    fn settings(&self) -> &Settings;

    fn update_settings(&mut self, settings: Settings);

    /// Apply a change to a copy of the current settings and store it
    fn modify_settings(&mut self, f: &mut dyn FnMut(&mut Settings)) {
        let mut settings = *self.settings();
        f(&mut settings);
        self.update_settings(settings);
    }

    fn reset_settings(&mut self) {
        self.update_settings(Settings::default());
    }
}
