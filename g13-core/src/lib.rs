//! Device-agnostic interaction logic for the G13 keypad
//!
//! This crate contains everything between decoded reports and pixels that
//! does not touch an OS or a device:
//!
//! - Navigator: button/stick states to edge-triggered navigation events
//! - Screens (menus, idle, toast, confirm, adjusters) and the menu catalog
//! - Screen manager (stack, overlay, dirty tracking, render tick)
//! - Navigation controller (menu gesture, mode keys, idle timeout)
//! - G-key bindings and the key mapper
//! - Capability traits implemented by the runtime
//! - Settings and input tuning types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod keymap;
pub mod manager;
pub mod navigation;
pub mod screen;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use input::{NavigationEvent, Navigator, StickDirection};
pub use keymap::{KeyAction, KeyCode, KeyMapper, Keymap};
pub use manager::{ManagerError, ScreenManager};
pub use navigation::NavigationController;
pub use screen::{Screen, ScreenContext, View};
pub use traits::Services;
