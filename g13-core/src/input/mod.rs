//! Navigation input
//!
//! Turns decoded [`ButtonState`](g13_protocol::ButtonState)s into
//! edge-triggered, repeat-aware [`NavigationEvent`]s. Time is always passed
//! in explicitly so the whole layer is deterministic.

pub mod events;
pub mod navigator;
pub mod stick;

pub use events::NavigationEvent;
pub use navigator::{NavEvents, Navigator, MAX_EVENTS_PER_REPORT, NAV_BUTTONS};
pub use stick::StickDirection;
