//! Button states to key actions

use g13_protocol::{ButtonId, ButtonSet};
use heapless::Vec;

use super::{KeyCode, Keymap, MAX_COMBO};

/// Every G-key changing in one report, each with a full combo
pub const MAX_KEY_ACTIONS: usize = 22 * MAX_COMBO;

/// Key actions produced by one report
pub type KeyActions = Vec<KeyAction, MAX_KEY_ACTIONS>;

/// One key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyAction {
    pub key: KeyCode,
    pub pressed: bool,
}

impl KeyAction {
    pub const fn press(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    pub const fn release(key: KeyCode) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Edge detector from G-key states to key actions
///
/// Tracks which bound G-keys it has pressed so every press gets exactly one
/// release, even across a keymap change.
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    keymap: Keymap,
    /// Bound G-keys whose combo is currently down
    held: ButtonSet,
}

impl KeyMapper {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            held: ButtonSet::EMPTY,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// G-keys whose combo is down
    pub fn held(&self) -> ButtonSet {
        self.held
    }

    /// Translate the buttons held in one report
    ///
    /// Releases come first, combos in reverse order; then presses, combos
    /// in order.
    pub fn process(&mut self, pressed: &ButtonSet) -> KeyActions {
        let mut actions = KeyActions::new();

        for button in self.held.difference(pressed).iter() {
            self.release(button, &mut actions);
        }
        for button in pressed.difference(&self.held).iter() {
            if button.is_g_key() && self.keymap.is_bound(button) {
                for &key in self.keymap.combo(button) {
                    let _ = actions.push(KeyAction::press(key));
                }
                self.held.insert(button);
            }
        }
        actions
    }

    /// Release everything still down, e.g. when the device goes away
    pub fn release_all(&mut self) -> KeyActions {
        let mut actions = KeyActions::new();
        let held = self.held;
        for button in held.iter() {
            self.release(button, &mut actions);
        }
        actions
    }

    /// Switch keymaps, releasing what the old one pressed
    pub fn set_keymap(&mut self, keymap: Keymap) -> KeyActions {
        let actions = self.release_all();
        self.keymap = keymap;
        actions
    }

    fn release(&mut self, button: ButtonId, actions: &mut KeyActions) {
        for &key in self.keymap.combo(button).iter().rev() {
            let _ = actions.push(KeyAction::release(key));
        }
        self.held.remove(button);
    }
}
