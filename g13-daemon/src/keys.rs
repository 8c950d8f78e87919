//! Key output for G-key bindings
//!
//! The poller hands every batch of key actions to a [`KeyOutput`]. Host
//! keyboard injection is not done here; the daemon logs the actions so a
//! wrapper (or a future injector) can pick them up.

use log::info;

use g13_core::keymap::KeyAction;

use crate::poller::SinkError;

/// Destination of key actions
pub trait KeyOutput {
    /// Emit one batch; actions of a batch belong to the same report
    fn emit(&mut self, actions: &[KeyAction]) -> Result<(), SinkError>;
}

/// Logs each key action at `info`
#[derive(Debug, Default)]
pub struct LogKeys {
    emitted: u64,
}

impl LogKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions logged so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl KeyOutput for LogKeys {
    fn emit(&mut self, actions: &[KeyAction]) -> Result<(), SinkError> {
        for action in actions {
            let state = if action.pressed { "down" } else { "up" };
            match action.key.name() {
                Some(name) => info!("Key {} {}", name, state),
                None => info!("Key {} {}", action.key.0, state),
            }
        }
        self.emitted += actions.len() as u64;
        Ok(())
    }
}
