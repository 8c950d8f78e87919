//! G-key bindings
//!
//! Each profile maps the 22 G-keys to a key or a short key combination.
//! The [`KeyMapper`] turns button states into key press and release
//! actions for whatever injects them into the host.

mod codes;
mod mapper;

pub use codes::KeyCode;
pub use mapper::{KeyAction, KeyActions, KeyMapper, MAX_KEY_ACTIONS};

use g13_protocol::{ButtonId, BUTTON_COUNT};
use heapless::Vec;

/// Longest combination one G-key can send (e.g. Ctrl+Shift+Alt+X)
pub const MAX_COMBO: usize = 4;

/// Keys sent by one G-key, pressed in order and released in reverse
pub type KeyCombo = Vec<KeyCode, MAX_COMBO>;

/// Errors while building a keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    /// Only G-keys can be bound; the rest drive the menus
    NotProgrammable(ButtonId),
    /// More than [`MAX_COMBO`] keys
    ComboTooLong(ButtonId),
}

/// G-key to key combination table for one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    combos: [KeyCombo; BUTTON_COUNT],
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    /// No key bound
    pub fn new() -> Self {
        Self {
            combos: core::array::from_fn(|_| KeyCombo::new()),
        }
    }

    /// Bind `button` to `keys`
    ///
    /// `KEY_RESERVED` entries are skipped, so a binding of only reserved
    /// keys leaves the button unbound.
    pub fn bind(&mut self, button: ButtonId, keys: &[KeyCode]) -> Result<(), KeymapError> {
        if !button.is_g_key() {
            return Err(KeymapError::NotProgrammable(button));
        }

        let mut combo = KeyCombo::new();
        for &key in keys.iter().filter(|key| !key.is_reserved()) {
            combo
                .push(key)
                .map_err(|_| KeymapError::ComboTooLong(button))?;
        }
        self.combos[button.index()] = combo;
        Ok(())
    }

    pub fn unbind(&mut self, button: ButtonId) {
        self.combos[button.index()].clear();
    }

    /// Keys bound to `button`; empty when unbound
    pub fn combo(&self, button: ButtonId) -> &[KeyCode] {
        &self.combos[button.index()]
    }

    pub fn is_bound(&self, button: ButtonId) -> bool {
        !self.combo(button).is_empty()
    }

    /// Number of bound G-keys
    pub fn bound_count(&self) -> usize {
        self.combos.iter().filter(|combo| !combo.is_empty()).count()
    }
}
